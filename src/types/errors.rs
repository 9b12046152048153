use serde::Deserialize;

use super::http_client::HttpResponse;

/// Error envelope the Cidaas services wrap API failures in:
/// `{"success":false,"status":417,"error":{"code":10009,"error":"..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorBody {
    /// Http status echoed by the provider
    pub status: Option<u16>,
    /// Nested error object
    pub error: Option<ProviderErrorDetail>,
}

/// The nested `error` object of a provider failure body.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorDetail {
    /// Provider specific numeric error code, e.g. 10009
    pub code: Option<i64>,
    /// Short error message
    pub error: Option<String>,
}

/// Construction failed: a required configuration value is empty or absent.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// What was wrong with the configuration
    pub message: String,
}

/// The discovery document could not be fetched or is unusable.
#[derive(Debug, Clone)]
pub struct DiscoveryError {
    /// What went wrong while resolving the metadata
    pub message: String,
    /// The discovery response, when one was received
    pub response: Option<HttpResponse>,
}

/// A required parameter for the requested operation was empty or absent.
/// Raised before any request is sent.
#[derive(Debug, Clone)]
pub struct MissingParameterError {
    /// Name of the missing parameter, e.g. `code`
    pub parameter: String,
    /// Description of the failure
    pub message: String,
}

/// The requested grant type is not one the provider supports.
/// Raised before any request is sent.
#[derive(Debug, Clone)]
pub struct InvalidGrantTypeError {
    /// The unsupported grant type name
    pub grant_type: String,
}

/// The provider answered with a non-2xx status.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Http status of the failing response
    pub http_status: u16,
    /// Provider specific `error.code` when the body carried one
    pub provider_error_code: Option<i64>,
    /// Short description of the failure
    pub message: String,
    /// The response body exactly as received
    pub raw_body: Option<String>,
}

/// The transport succeeded but the body was not the JSON the operation expected.
#[derive(Debug, Clone)]
pub struct MalformedResponseError {
    /// The decode error reported by the JSON parser
    pub message: String,
    /// The body that failed to decode
    pub raw_body: Option<String>,
}

/// Network level failure: refused connection, timeout, DNS, cancellation.
#[derive(Debug, Clone)]
pub struct TransportError {
    /// The transport's description of the failure
    pub message: String,
}

/// # CidaasClientError
/// Every failure the SDK surfaces, tagged by kind so callers can branch on
/// the category instead of inspecting message strings.
#[derive(Debug, Clone)]
pub enum CidaasClientError {
    /// Bad construction input
    Config(ConfigError),
    /// Metadata fetch or parse failure
    Discovery(DiscoveryError),
    /// Local validation failure: required parameter absent
    MissingParameter(MissingParameterError),
    /// Local validation failure: unsupported grant type
    InvalidGrantType(InvalidGrantTypeError),
    /// Non-2xx answer from the provider
    Api(ApiError),
    /// JSON decode failure on an otherwise successful response
    MalformedResponse(MalformedResponseError),
    /// Network level failure
    Transport(TransportError),
}

impl CidaasClientError {
    /// Creates a new [CidaasClientError::Config]
    pub fn new_config_error(message: &str) -> Self {
        Self::Config(ConfigError {
            message: message.to_string(),
        })
    }

    /// Creates a new [CidaasClientError::Discovery]
    pub fn new_discovery_error(message: &str, response: Option<HttpResponse>) -> Self {
        Self::Discovery(DiscoveryError {
            message: message.to_string(),
            response,
        })
    }

    /// Creates a new [CidaasClientError::MissingParameter]
    pub fn new_missing_parameter_error(parameter: &str) -> Self {
        Self::MissingParameter(MissingParameterError {
            parameter: parameter.to_string(),
            message: format!("{parameter} must not be empty"),
        })
    }

    /// Creates a new [CidaasClientError::InvalidGrantType]
    pub fn new_invalid_grant_type_error(grant_type: &str) -> Self {
        Self::InvalidGrantType(InvalidGrantTypeError {
            grant_type: grant_type.to_string(),
        })
    }

    /// Creates a new [CidaasClientError::Api] from a failing response. When the
    /// body parses as the provider's error envelope, the nested `error.code`
    /// is lifted into the error.
    pub fn new_api_error(response: &HttpResponse) -> Self {
        let mut provider_error_code = None;
        let mut message = format!("server responded with status {}", response.status_code);

        if let Some(body) = &response.body {
            if let Ok(parsed) = serde_json::from_str::<ProviderErrorBody>(body) {
                if let Some(detail) = parsed.error {
                    provider_error_code = detail.code;
                    if let Some(msg) = detail.error {
                        message = msg;
                    }
                }
            }
        }

        Self::Api(ApiError {
            http_status: response.status_code,
            provider_error_code,
            message,
            raw_body: response.body.clone(),
        })
    }

    /// Creates a new [CidaasClientError::MalformedResponse]
    pub fn new_malformed_response_error(message: &str, raw_body: Option<String>) -> Self {
        Self::MalformedResponse(MalformedResponseError {
            message: message.to_string(),
            raw_body,
        })
    }

    /// Creates a new [CidaasClientError::Transport]
    pub fn new_transport_error(message: &str) -> Self {
        Self::Transport(TransportError {
            message: message.to_string(),
        })
    }

    /// Returns true if the error is a [CidaasClientError::Config]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if the error is a [CidaasClientError::Discovery]
    pub fn is_discovery_error(&self) -> bool {
        matches!(self, Self::Discovery(_))
    }

    /// Returns true if the error is a [CidaasClientError::MissingParameter]
    pub fn is_missing_parameter_error(&self) -> bool {
        matches!(self, Self::MissingParameter(_))
    }

    /// Returns true if the error is a [CidaasClientError::InvalidGrantType]
    pub fn is_invalid_grant_type_error(&self) -> bool {
        matches!(self, Self::InvalidGrantType(_))
    }

    /// Returns true if the error is a [CidaasClientError::Api]
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Returns true if the error is a [CidaasClientError::MalformedResponse]
    pub fn is_malformed_response_error(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    /// Returns true if the error is a [CidaasClientError::Transport]
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Unwraps to [ConfigError]. Panics if the kind does not match.
    pub fn config_error(&self) -> &ConfigError {
        match self {
            Self::Config(e) => e,
            _ => panic!("expected Config error, got: {self:?}"),
        }
    }

    /// Unwraps to [DiscoveryError]. Panics if the kind does not match.
    pub fn discovery_error(&self) -> &DiscoveryError {
        match self {
            Self::Discovery(e) => e,
            _ => panic!("expected Discovery error, got: {self:?}"),
        }
    }

    /// Unwraps to [MissingParameterError]. Panics if the kind does not match.
    pub fn missing_parameter_error(&self) -> &MissingParameterError {
        match self {
            Self::MissingParameter(e) => e,
            _ => panic!("expected MissingParameter error, got: {self:?}"),
        }
    }

    /// Unwraps to [InvalidGrantTypeError]. Panics if the kind does not match.
    pub fn invalid_grant_type_error(&self) -> &InvalidGrantTypeError {
        match self {
            Self::InvalidGrantType(e) => e,
            _ => panic!("expected InvalidGrantType error, got: {self:?}"),
        }
    }

    /// Unwraps to [ApiError]. Panics if the kind does not match.
    pub fn api_error(&self) -> &ApiError {
        match self {
            Self::Api(e) => e,
            _ => panic!("expected Api error, got: {self:?}"),
        }
    }

    /// Unwraps to [MalformedResponseError]. Panics if the kind does not match.
    pub fn malformed_response_error(&self) -> &MalformedResponseError {
        match self {
            Self::MalformedResponse(e) => e,
            _ => panic!("expected MalformedResponse error, got: {self:?}"),
        }
    }

    /// Unwraps to [TransportError]. Panics if the kind does not match.
    pub fn transport_error(&self) -> &TransportError {
        match self {
            Self::Transport(e) => e,
            _ => panic!("expected Transport error, got: {self:?}"),
        }
    }
}

/// Return type of every fallible SDK operation.
pub type CidaasReturnType<T> = Result<T, Box<CidaasClientError>>;
