//! Default Http Client

use std::time::Duration;

use reqwest::{
    header::{CONTENT_TYPE, LOCATION},
    ClientBuilder, Method, Response,
};

use crate::types::http_client::{CidaasHttpClient, HttpMethod, HttpRequest, HttpResponse};

/// The default HttpClient, backed by [reqwest]. Redirects are not followed so
/// end session answers surface their `location` header to the caller.
pub struct DefaultHttpClient;

impl DefaultHttpClient {
    async fn to_response(response: Response) -> HttpResponse {
        let status_code = response.status().as_u16();
        let response_headers = response.headers().clone();

        let mut content_type = None;

        if let Some(Ok(ct)) = response_headers
            .get(CONTENT_TYPE)
            .map(|ct| ct.to_str().map(|s| s.to_string()))
        {
            content_type = Some(ct);
        };

        let mut location = None;

        if let Some(Ok(loc)) = response_headers
            .get(LOCATION)
            .map(|loc| loc.to_str().map(|s| s.to_string()))
        {
            location = Some(loc);
        };

        let body_result = response.text().await;
        let mut body: Option<String> = None;
        if let Ok(body_string) = body_result {
            if !body_string.is_empty() {
                body = Some(body_string);
            }
        }

        HttpResponse {
            body,
            status_code,
            content_type,
            location,
        }
    }
}

impl CidaasHttpClient for DefaultHttpClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, String> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| format!("{e}"))?;

        let method = match req.method {
            HttpMethod::GET => Method::GET,
            HttpMethod::POST => Method::POST,
            HttpMethod::PUT => Method::PUT,
            HttpMethod::DELETE => Method::DELETE,
        };

        let mut req_builder = client.request(method, req.url);

        if let Some(body) = req.body {
            req_builder = req_builder.body(body);
        }

        for (name, values) in req.headers {
            for value in values {
                req_builder = req_builder.header(name.clone(), value);
            }
        }

        req_builder = req_builder.header("User-Agent", "cidaas-client");

        match req_builder.send().await {
            Ok(res) => Ok(Self::to_response(res).await),
            Err(e) => Err(format!("{e}")),
        }
    }
}
