use std::collections::HashMap;

/// # AuthorizationUrlParameters
/// Customizes the authorization url built by
/// [crate::provider::Provider::authorization_url]. Every field is optional;
/// `client_id` is always taken from the configuration, `response_type`
/// defaults to `code`, `redirect_uri` falls back to the configured one,
/// `state` is generated when absent and `nonce` is generated whenever the
/// scope includes `openid` and none was supplied.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationUrlParameters {
    /// Space separated scopes, e.g. `openid profile`
    pub scope: Option<String>,
    /// Opaque value echoed back on the redirect
    pub state: Option<String>,
    /// Replay protection value bound into the id token
    pub nonce: Option<String>,
    /// OAuth response type, defaults to `code`
    pub response_type: Option<String>,
    /// Overrides the configured redirect uri
    pub redirect_uri: Option<String>,
    /// Which hosted page to present, e.g. `login` or `register`
    pub view_type: Option<String>,
    /// Any further provider specific query parameters
    pub other: Option<HashMap<String, String>>,
}

impl AuthorizationUrlParameters {
    /// Parameters with only the scope set.
    pub fn scope(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            ..Default::default()
        }
    }
}
