use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// # ProviderMetadata
/// The provider's discovery document, fetched once per
/// [crate::provider::Provider] instance from
/// `{base_url}/.well-known/openid-configuration` and shared read-only by all
/// subsequent operations of that instance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderMetadata {
    /// Discovered issuer uri
    #[serde(default)]
    pub issuer: String,
    /// OpenID Connect [Authorization Endpoint](https://openid.net/specs/openid-connect-core-1_0.html#AuthorizationEndpoint)
    pub authorization_endpoint: Option<String>,
    /// OpenID Connect [Token Endpoint](https://openid.net/specs/openid-connect-core-1_0.html#TokenEndpoint)
    pub token_endpoint: Option<String>,
    /// OpenID Connect [Userinfo Endpoint](https://openid.net/specs/openid-connect-core-1_0.html#UserInfo)
    pub userinfo_endpoint: Option<String>,
    /// Endpoint for validating opaque tokens. [RFC 7662](https://www.rfc-editor.org/rfc/rfc7662)
    pub introspection_endpoint: Option<String>,
    /// [End session endpoint](https://openid.net/specs/openid-connect-rpinitiated-1_0.html#OPMetadata)
    pub end_session_endpoint: Option<String>,
    /// Endpoint for revoking refresh tokens and access tokens
    pub revocation_endpoint: Option<String>,
    /// URL of the authorization server's JWK Set
    pub jwks_uri: Option<String>,
    /// Scopes the provider supports
    pub scopes_supported: Option<Vec<String>>,
    /// OAuth 2.0 response types the provider supports
    pub response_types_supported: Option<Vec<String>>,
    /// OAuth 2.0 grant types the provider supports
    pub grant_types_supported: Option<Vec<String>>,
    /// Extra key values
    #[serde(flatten)]
    pub other_fields: HashMap<String, Value>,
}

impl ProviderMetadata {
    /// Returns the name of the first endpoint this SDK uses that the
    /// document does not carry, if any. A document missing one of these is
    /// unusable and rejected at discovery time.
    pub(crate) fn missing_endpoint(&self) -> Option<&'static str> {
        if self.authorization_endpoint.is_none() {
            return Some("authorization_endpoint");
        }
        if self.token_endpoint.is_none() {
            return Some("token_endpoint");
        }
        if self.userinfo_endpoint.is_none() {
            return Some("userinfo_endpoint");
        }
        if self.introspection_endpoint.is_none() {
            return Some("introspection_endpoint");
        }
        if self.end_session_endpoint.is_none() {
            return Some("end_session_endpoint");
        }
        None
    }
}
