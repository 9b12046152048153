//! Multi-step orchestrations composed from the single operations. Each step
//! short-circuits on failure, so a rejected login never reaches the token
//! endpoint.

use std::collections::HashMap;

use serde_json::Value;

use crate::provider::Provider;
use crate::tokenset::TokenSet;
use crate::types::{
    CidaasClientError, CidaasHttpClient, CidaasReturnType, CredentialsLoginParams, GrantType,
    ResetPasswordParams, TokenRequestParams,
};

impl Provider {
    /// # Login With Credentials Flow
    /// The full headless login: mints a request id, authenticates the
    /// credentials and exchanges the resulting authorization code for
    /// tokens.
    ///
    /// - `http_client` - The http client to make the requests
    /// - `username` - The identifier the user logs in with
    /// - `username_type` - What kind of identifier it is, e.g. `email`
    /// - `password` - The user's password
    pub async fn login_with_credentials_flow<T>(
        &self,
        http_client: &T,
        username: &str,
        username_type: &str,
        password: &str,
    ) -> CidaasReturnType<TokenSet>
    where
        T: CidaasHttpClient,
    {
        let request_id = self.get_request_id(http_client, None).await?;

        let login = self
            .login_with_credentials(
                http_client,
                CredentialsLoginParams {
                    username: username.to_string(),
                    username_type: username_type.to_string(),
                    password: password.to_string(),
                    request_id,
                },
            )
            .await?;

        let code = match login.pointer("/data/code").and_then(Value::as_str) {
            Some(code) => code.to_string(),
            None => {
                return Err(Box::new(CidaasClientError::new_malformed_response_error(
                    "login response did not contain data.code",
                    Some(login.to_string()),
                )))
            }
        };

        self.get_access_token(
            http_client,
            GrantType::AuthorizationCode,
            TokenRequestParams::code(code),
        )
        .await
    }

    /// # Register Flow
    /// Mints a request id, fetches the registration setup for it and
    /// registers the user with the supplied field values.
    ///
    /// - `http_client` - The http client to make the requests
    /// - `fields` - Field values per the registration setup
    /// - `locale` - Language used when fetching the setup
    pub async fn register_flow<T>(
        &self,
        http_client: &T,
        fields: HashMap<String, Value>,
        locale: &str,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        let request_id = self.get_request_id(http_client, None).await?;

        self.get_registration_setup(http_client, &request_id, locale)
            .await?;

        self.register(http_client, fields, &request_id).await
    }

    /// # Start Reset Password
    /// Mints a request id and initiates the password reset for `email`. The
    /// returned document carries `data.reset_request_id`, to be kept until
    /// the user comes back with the emailed code.
    ///
    /// - `http_client` - The http client to make the requests
    /// - `email` - Email of the account to reset
    pub async fn start_reset_password<T>(
        &self,
        http_client: &T,
        email: &str,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        let request_id = self.get_request_id(http_client, None).await?;

        self.initiate_reset_password(http_client, email, &request_id)
            .await
    }

    /// # Complete Reset Password
    /// Validates the emailed code and accepts the new password in one call.
    ///
    /// - `http_client` - The http client to make the requests
    /// - `code` - The code the user received
    /// - `reset_request_id` - Handle from the initiate step
    /// - `password` - The new password
    /// - `confirm_password` - Repetition of the new password
    pub async fn complete_reset_password<T>(
        &self,
        http_client: &T,
        code: &str,
        reset_request_id: &str,
        password: &str,
        confirm_password: &str,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        let validated = self
            .handle_reset_password(http_client, code, reset_request_id)
            .await?;

        let exchange_id = match validated.pointer("/data/exchangeId").and_then(Value::as_str) {
            Some(exchange_id) => exchange_id.to_string(),
            None => {
                return Err(Box::new(CidaasClientError::new_malformed_response_error(
                    "validate code response did not contain data.exchangeId",
                    Some(validated.to_string()),
                )))
            }
        };

        self.reset_password(
            http_client,
            ResetPasswordParams {
                password: password.to_string(),
                confirm_password: confirm_password.to_string(),
                exchange_id,
                reset_request_id: reset_request_id.to_string(),
            },
        )
        .await
    }
}
