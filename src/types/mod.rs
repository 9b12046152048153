//! # Types Module
//! All the types: requests, responses, parameters and errors.

mod authorization_params;
mod errors;
mod grant;
/// Http client interface
pub mod http_client;
mod provider_config;
mod provider_metadata;
mod request_params;
mod service_paths;

pub use authorization_params::AuthorizationUrlParameters;
pub use errors::{
    ApiError, CidaasClientError, CidaasReturnType, ConfigError, DiscoveryError,
    InvalidGrantTypeError, MalformedResponseError, MissingParameterError, ProviderErrorBody,
    ProviderErrorDetail, TransportError,
};
pub use grant::{GrantType, TokenRequestParams};
pub use http_client::{CidaasHttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use provider_config::ProviderConfig;
pub use provider_metadata::ProviderMetadata;
pub use request_params::{
    AuthenticateMfaParams, ChangePasswordParams, CredentialsLoginParams, InitiateMfaParams,
    IntrospectionParams, ResetPasswordParams,
};
pub use service_paths::ServicePaths;
