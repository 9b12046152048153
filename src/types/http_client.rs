//! # Http Client Interface for Custom Http Clients

use std::collections::HashMap;
use std::fmt::Debug;

use url::Url;

use crate::helpers::string_map_to_form_url_encoded;

/// The Http methods used by the SDK
#[derive(Debug, Default, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub enum HttpMethod {
    /// The GET method is used to retrieve data from a server.
    #[default]
    GET,
    /// The POST method is used to submit data to a server.
    POST,
    /// The PUT method is used to replace existing data on a server.
    PUT,
    /// The DELETE method is used to delete a resource from a server.
    DELETE,
}

/// The expectations set by operations such as discovery, token grant, logout etc...
#[derive(Debug, Clone, Copy)]
pub struct HttpResponseExpectations {
    /// Whether or not to expect a body with the response
    pub body: bool,
    /// Whether the body, when present, must be valid JSON
    pub json_body: bool,
}

/// # HttpRequest
/// HttpRequest is an internal struct used to shape the requests of every
/// SDK operation before they are handed to the [CidaasHttpClient].
#[derive(Debug)]
pub struct HttpRequest {
    /// Url of the request, query included
    pub url: Url,
    /// Http method of the request
    pub method: HttpMethod,
    /// Headers that are sent in the request
    pub headers: HashMap<String, Vec<String>>,
    /// The request body to be sent
    pub body: Option<String>,
    /// Expectations to be fulfilled by the response
    pub(crate) expectations: HttpResponseExpectations,
}

impl HttpRequest {
    pub(crate) fn new() -> Self {
        Self {
            url: Url::parse("about:blank").unwrap(),
            headers: HashMap::new(),
            method: HttpMethod::GET,
            body: None,
            expectations: HttpResponseExpectations {
                body: true,
                json_body: true,
            },
        }
    }

    pub(crate) fn url(mut self, url: Url) -> Self {
        self.url = url;
        self
    }

    pub(crate) fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub(crate) fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();

        if let Some(values) = self.headers.get_mut(&name) {
            values.push(value);
        } else {
            self.headers.insert(name, vec![value]);
        }
        self
    }

    pub(crate) fn json(mut self, json: String) -> Self {
        self.headers.insert(
            "content-type".to_string(),
            vec!["application/json".to_string()],
        );
        self.body(json)
    }

    pub(crate) fn form(mut self, form: HashMap<String, String>) -> Self {
        let form_body = string_map_to_form_url_encoded(&form);
        self.headers.insert(
            "content-type".to_string(),
            vec!["application/x-www-form-urlencoded".to_string()],
        );
        self.body(form_body)
    }

    pub(crate) fn body(mut self, body: String) -> Self {
        self.headers.insert(
            "content-length".to_string(),
            vec![body.as_bytes().len().to_string()],
        );
        self.body = Some(body);
        self
    }

    pub(crate) fn expect_body(mut self, expect: bool) -> Self {
        self.expectations.body = expect;
        self
    }

    pub(crate) fn expect_json_body(mut self, expect: bool) -> Self {
        self.expectations.json_body = expect;
        self
    }
}

/// Represents an HTTP response received from a server.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code of the response (e.g., 200 for success, 404 for Not Found).
    pub status_code: u16,
    /// The content type header
    pub content_type: Option<String>,
    /// The location header, set on redirect answers such as end session
    pub location: Option<String>,
    /// The optional body content of the response. None if there is no body content.
    pub body: Option<String>,
}

/// This trait defines the interface for making HTTP requests used by the SDK.
/// Users who need custom HTTP clients need to implement this trait.
pub trait CidaasHttpClient {
    /// Makes an HTTP request using the provided [HttpRequest] object.
    ///
    /// The returned future resolves to either `Ok(HttpResponse)` containing
    /// the HTTP response, or `Err(String)` with a message describing the
    /// transport failure. This function allows the library to be agnostic to
    /// the specific HTTP client implementation used, as long as it
    /// implements this trait.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, String>> + Send;
}
