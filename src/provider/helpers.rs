//! Request dispatch and response classification shared by every operation.

use serde_json::Value;
use url::Url;

use crate::types::{
    CidaasClientError, CidaasHttpClient, CidaasReturnType, HttpRequest, HttpResponse,
};

/// Sends `request` and classifies the outcome.
///
/// - transport level `Err(String)` becomes a Transport error
/// - a status >= 400 becomes an Api error carrying the raw body
/// - a missing body becomes MalformedResponse when one was expected
/// - a non-JSON body becomes MalformedResponse when JSON was expected
pub(crate) async fn send_request<T>(
    http_client: &T,
    request: HttpRequest,
) -> CidaasReturnType<HttpResponse>
where
    T: CidaasHttpClient,
{
    let expectations = request.expectations;

    let response = http_client
        .request(request)
        .await
        .map_err(|e| Box::new(CidaasClientError::new_transport_error(&e)))?;

    if response.status_code >= 400 {
        return Err(Box::new(CidaasClientError::new_api_error(&response)));
    }

    if expectations.body && response.body.is_none() {
        return Err(Box::new(CidaasClientError::new_malformed_response_error(
            "expected a body in the response",
            None,
        )));
    }

    if expectations.json_body {
        if let Some(body) = &response.body {
            if let Err(e) = serde_json::from_str::<Value>(body) {
                return Err(Box::new(CidaasClientError::new_malformed_response_error(
                    &e.to_string(),
                    Some(body.clone()),
                )));
            }
        }
    }

    Ok(response)
}

/// Sends `request` and decodes the successful body as JSON.
pub(crate) async fn send_json<T>(http_client: &T, request: HttpRequest) -> CidaasReturnType<Value>
where
    T: CidaasHttpClient,
{
    let response = send_request(http_client, request).await?;

    let body = response.body.as_deref().unwrap_or_default();

    serde_json::from_str::<Value>(body).map_err(|e| {
        Box::new(CidaasClientError::new_malformed_response_error(
            &e.to_string(),
            response.body.clone(),
        ))
    })
}

/// Parses a discovered endpoint into a [Url]. A document that passed the
/// discovery checks can still carry an unparsable value; that is reported as
/// a Discovery error naming the endpoint.
pub(crate) fn endpoint_url(endpoint: Option<&String>, name: &str) -> CidaasReturnType<Url> {
    let endpoint = endpoint.ok_or_else(|| {
        Box::new(CidaasClientError::new_discovery_error(
            &format!("provider metadata is missing {name}"),
            None,
        ))
    })?;

    Url::parse(endpoint).map_err(|_| {
        Box::new(CidaasClientError::new_discovery_error(
            &format!("{name} is not a valid url"),
            None,
        ))
    })
}

/// Bearer authorization header value.
pub(crate) fn bearer_authorization(access_token: &str) -> String {
    format!("Bearer {access_token}")
}

/// Rejects an empty or whitespace-only required parameter before any
/// request is built.
pub(crate) fn require_non_empty(value: &str, parameter: &str) -> CidaasReturnType<()> {
    if value.trim().is_empty() {
        return Err(Box::new(CidaasClientError::new_missing_parameter_error(
            parameter,
        )));
    }
    Ok(())
}
