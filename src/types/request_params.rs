//! Typed per-operation parameter structs, documenting which fields each
//! operation requires instead of accepting loose option bags.

/// Inputs for [crate::provider::Provider::login_with_credentials].
#[derive(Debug, Clone)]
pub struct CredentialsLoginParams {
    /// The identifier the user logs in with
    pub username: String,
    /// What kind of identifier `username` is: `email`, `mobile` or `username`
    pub username_type: String,
    /// The user's password
    pub password: String,
    /// Request id minted by [crate::provider::Provider::get_request_id]
    pub request_id: String,
}

/// Inputs for [crate::provider::Provider::change_password]. The access token
/// of the logged in user is passed separately.
#[derive(Debug, Clone)]
pub struct ChangePasswordParams {
    /// The password being replaced
    pub old_password: String,
    /// The new password
    pub new_password: String,
    /// Repetition of the new password, must match server side
    pub confirm_password: String,
    /// Identity id of the credential being changed
    pub identity_id: String,
}

/// Inputs for [crate::provider::Provider::reset_password], the final step of
/// the reset flow. `exchange_id` and `reset_request_id` come from the
/// validate code step.
#[derive(Debug, Clone)]
pub struct ResetPasswordParams {
    /// The new password
    pub password: String,
    /// Repetition of the new password
    pub confirm_password: String,
    /// Exchange id issued by the validate code step
    pub exchange_id: String,
    /// Reset request id issued by the initiate step
    pub reset_request_id: String,
}

/// Inputs for [crate::provider::Provider::initiate_mfa].
#[derive(Debug, Clone, Default)]
pub struct InitiateMfaParams {
    /// Request id binding this authentication attempt
    pub request_id: String,
    /// Subject of the user when known
    pub sub: Option<String>,
    /// Email of the user, accepted by the provider instead of `sub`
    pub email: Option<String>,
}

/// Inputs for [crate::provider::Provider::authenticate_mfa].
#[derive(Debug, Clone)]
pub struct AuthenticateMfaParams {
    /// Exchange id issued by the initiate step
    pub exchange_id: String,
    /// The one time code the user received
    pub pass_code: String,
}

/// Inputs for [crate::provider::Provider::introspect_token].
#[derive(Debug, Clone)]
pub struct IntrospectionParams {
    /// The opaque token to introspect
    pub token: String,
    /// Hint for the server, defaults to `access_token`
    pub token_type_hint: Option<String>,
}

impl IntrospectionParams {
    /// Params for introspecting an access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type_hint: None,
        }
    }
}
