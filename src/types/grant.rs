use std::str::FromStr;

use super::errors::CidaasClientError;

/// # GrantType
/// The OAuth 2.0 grants supported by
/// [crate::provider::Provider::get_access_token]. Anything outside this
/// enumeration is rejected with an InvalidGrantType error before a request
/// is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    /// Exchange an authorization code from a login for tokens
    AuthorizationCode,
    /// Exchange a refresh token for a fresh access token
    RefreshToken,
    /// Obtain a client context token from the client credentials alone
    ClientCredentials,
}

impl GrantType {
    /// The wire name of the grant, sent as the `grant_type` form parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::AuthorizationCode => "authorization_code",
            GrantType::RefreshToken => "refresh_token",
            GrantType::ClientCredentials => "client_credentials",
        }
    }
}

impl FromStr for GrantType {
    type Err = Box<CidaasClientError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authorization_code" => Ok(GrantType::AuthorizationCode),
            "refresh_token" => Ok(GrantType::RefreshToken),
            "client_credentials" => Ok(GrantType::ClientCredentials),
            other => Err(Box::new(CidaasClientError::new_invalid_grant_type_error(
                other,
            ))),
        }
    }
}

/// # TokenRequestParams
/// Grant specific inputs for [crate::provider::Provider::get_access_token].
/// Which field is required depends on the grant:
/// `authorization_code` needs `code`, `refresh_token` needs `refresh_token`,
/// `client_credentials` needs neither.
#[derive(Debug, Clone, Default)]
pub struct TokenRequestParams {
    /// The authorization code returned by a credential or browser login
    pub code: Option<String>,
    /// A refresh token from an earlier token response
    pub refresh_token: Option<String>,
}

impl TokenRequestParams {
    /// Params carrying an authorization code.
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            refresh_token: None,
        }
    }

    /// Params carrying a refresh token.
    pub fn refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            code: None,
            refresh_token: Some(refresh_token.into()),
        }
    }
}
