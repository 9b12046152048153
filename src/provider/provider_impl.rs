//! The per-operation methods of [Provider].

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::helpers::{
    append_query, basic_authorization, convert_json_to, generate_nonce, generate_state,
};
use crate::provider::helpers::{
    bearer_authorization, endpoint_url, require_non_empty, send_json, send_request,
};
use crate::provider::Provider;
use crate::tokenset::{TokenSet, TokenSetParams};
use crate::types::{
    AuthorizationUrlParameters, AuthenticateMfaParams, ChangePasswordParams, CidaasClientError,
    CidaasHttpClient, CidaasReturnType, CredentialsLoginParams, GrantType, HttpMethod,
    HttpRequest, HttpResponse, InitiateMfaParams, IntrospectionParams, ResetPasswordParams,
    TokenRequestParams,
};

impl Provider {
    /// # Get Request Id
    /// Mints a request id that binds one authentication attempt. Every
    /// credential login, registration and multi factor exchange starts here.
    ///
    /// - `http_client` - The http client to make the request
    /// - `scope` - Scopes of the attempt, defaults to `openid`
    pub async fn get_request_id<T>(
        &self,
        http_client: &T,
        scope: Option<&str>,
    ) -> CidaasReturnType<String>
    where
        T: CidaasHttpClient,
    {
        let redirect_uri = self.config.redirect_uri.as_deref().unwrap_or_default();
        require_non_empty(redirect_uri, "redirect_uri")?;

        let body = json!({
            "client_id": self.config.client_id,
            "redirect_uri": redirect_uri,
            "response_type": "code",
            "scope": scope.unwrap_or("openid"),
            "nonce": generate_nonce(),
        });

        let request = HttpRequest::new()
            .url(self.service_url(self.paths.request_id)?)
            .method(HttpMethod::POST)
            .json(body.to_string());

        let value = send_json(http_client, request).await?;

        match value.pointer("/data/requestId").and_then(Value::as_str) {
            Some(request_id) => Ok(request_id.to_string()),
            None => Err(Box::new(CidaasClientError::new_malformed_response_error(
                "response did not contain data.requestId",
                Some(value.to_string()),
            ))),
        }
    }

    /// # Login With Credentials
    /// Authenticates a user by username and password against the hosted
    /// login service. On success the returned document carries, among other
    /// fields, `data.code`: the authorization code to exchange with
    /// [Provider::get_access_token].
    ///
    /// - `http_client` - The http client to make the request
    /// - `params` - See [CredentialsLoginParams]
    pub async fn login_with_credentials<T>(
        &self,
        http_client: &T,
        params: CredentialsLoginParams,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(&params.username, "username")?;
        require_non_empty(&params.password, "password")?;
        require_non_empty(&params.request_id, "request_id")?;

        let body = json!({
            "username": params.username,
            "username_type": params.username_type,
            "password": params.password,
            "requestId": params.request_id,
        });

        let request = HttpRequest::new()
            .url(self.service_url(self.paths.login_sdk)?)
            .method(HttpMethod::POST)
            .json(body.to_string());

        send_json(http_client, request).await
    }

    /// # Get Access Token
    /// Performs a token endpoint grant. Which extra parameter is required
    /// depends on the grant: `AuthorizationCode` needs `params.code`,
    /// `RefreshToken` needs `params.refresh_token` and `ClientCredentials`
    /// needs neither. Validation happens before discovery, so a missing
    /// parameter fails without any request being sent.
    ///
    /// - `http_client` - The http client to make the request
    /// - `grant_type` - The grant to perform
    /// - `params` - See [TokenRequestParams]
    pub async fn get_access_token<T>(
        &self,
        http_client: &T,
        grant_type: GrantType,
        params: TokenRequestParams,
    ) -> CidaasReturnType<TokenSet>
    where
        T: CidaasHttpClient,
    {
        let mut form: HashMap<String, String> = HashMap::new();

        form.insert("grant_type".to_string(), grant_type.as_str().to_string());
        form.insert("client_id".to_string(), self.config.client_id.clone());
        form.insert(
            "client_secret".to_string(),
            self.config.client_secret.clone(),
        );

        match grant_type {
            GrantType::AuthorizationCode => {
                let code = params.code.as_deref().unwrap_or_default();
                require_non_empty(code, "code")?;
                form.insert("code".to_string(), code.to_string());
                if let Some(redirect_uri) = &self.config.redirect_uri {
                    form.insert("redirect_uri".to_string(), redirect_uri.clone());
                }
            }
            GrantType::RefreshToken => {
                let refresh_token = params.refresh_token.as_deref().unwrap_or_default();
                require_non_empty(refresh_token, "refresh_token")?;
                form.insert("refresh_token".to_string(), refresh_token.to_string());
            }
            GrantType::ClientCredentials => {}
        }

        let metadata = self.resolve_metadata(http_client).await?;

        let request = HttpRequest::new()
            .url(endpoint_url(
                metadata.token_endpoint.as_ref(),
                "token_endpoint",
            )?)
            .method(HttpMethod::POST)
            .form(form);

        let response = send_request(http_client, request).await?;
        let body = response.body.as_deref().unwrap_or_default();

        let token_params = convert_json_to::<TokenSetParams>(body).map_err(|e| {
            Box::new(CidaasClientError::new_malformed_response_error(
                &e,
                response.body.clone(),
            ))
        })?;

        Ok(TokenSet::new(token_params))
    }

    /// # Get User Profile
    /// Fetches the profile of the user an access token was issued for from
    /// the userinfo endpoint. When `sub` is given it is appended to the
    /// endpoint path, addressing that user's profile explicitly.
    ///
    /// - `http_client` - The http client to make the request
    /// - `access_token` - Access token of the user
    /// - `sub` - Optional subject to address
    pub async fn get_user_profile<T>(
        &self,
        http_client: &T,
        access_token: &str,
        sub: Option<&str>,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(access_token, "access_token")?;

        let metadata = self.resolve_metadata(http_client).await?;

        let mut url = endpoint_url(metadata.userinfo_endpoint.as_ref(), "userinfo_endpoint")?;

        if let Some(sub) = sub {
            let path = format!("{}/{}", url.path().trim_end_matches('/'), sub);
            url.set_path(&path);
        }

        let request = HttpRequest::new()
            .url(url)
            .method(HttpMethod::POST)
            .header("authorization", bearer_authorization(access_token));

        send_json(http_client, request).await
    }

    /// # Introspect Token
    /// Asks the introspection endpoint whether a token is active. When an
    /// `api_token` is supplied it authenticates the call as a bearer,
    /// otherwise the client credentials are sent as basic authorization.
    ///
    /// - `http_client` - The http client to make the request
    /// - `params` - See [IntrospectionParams]
    /// - `api_token` - Optional access token to authenticate the call with
    pub async fn introspect_token<T>(
        &self,
        http_client: &T,
        params: IntrospectionParams,
        api_token: Option<&str>,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(&params.token, "token")?;

        let metadata = self.resolve_metadata(http_client).await?;

        let body = json!({
            "token": params.token,
            "token_type_hint": params.token_type_hint.as_deref().unwrap_or("access_token"),
        });

        let authorization = match api_token {
            Some(token) => bearer_authorization(token),
            None => basic_authorization(&self.config.client_id, &self.config.client_secret),
        };

        let request = HttpRequest::new()
            .url(endpoint_url(
                metadata.introspection_endpoint.as_ref(),
                "introspection_endpoint",
            )?)
            .method(HttpMethod::POST)
            .header("authorization", authorization)
            .json(body.to_string());

        send_json(http_client, request).await
    }

    /// # Validate Access Token
    /// Introspects an access token and reduces the answer to its `active`
    /// flag. An answer without the flag counts as inactive.
    ///
    /// - `http_client` - The http client to make the request
    /// - `access_token` - The token to validate
    /// - `api_token` - Optional access token to authenticate the call with
    pub async fn validate_access_token<T>(
        &self,
        http_client: &T,
        access_token: &str,
        api_token: Option<&str>,
    ) -> CidaasReturnType<bool>
    where
        T: CidaasHttpClient,
    {
        let introspection = self
            .introspect_token(
                http_client,
                IntrospectionParams::new(access_token),
                api_token,
            )
            .await?;

        Ok(introspection
            .get("active")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    /// # End Session Url
    /// Builds the url that terminates the user's session at the provider,
    /// for the caller to redirect the browser to. `access_token_hint` tells
    /// the provider whose session to end; `post_logout_redirect_uri`, when
    /// given, is where the provider sends the browser afterwards.
    ///
    /// - `http_client` - The http client to make the discovery request
    /// - `access_token_hint` - Access token identifying the session
    /// - `post_logout_redirect_uri` - Optional url to return the browser to
    pub async fn end_session_url<T>(
        &self,
        http_client: &T,
        access_token_hint: &str,
        post_logout_redirect_uri: Option<&str>,
    ) -> CidaasReturnType<String>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(access_token_hint, "access_token_hint")?;

        let metadata = self.resolve_metadata(http_client).await?;

        let end_session_endpoint = endpoint_url(
            metadata.end_session_endpoint.as_ref(),
            "end_session_endpoint",
        )?;

        let mut params = vec![(
            "access_token_hint".to_string(),
            access_token_hint.to_string(),
        )];

        if let Some(post_logout) = post_logout_redirect_uri {
            params.push((
                "post_logout_redirect_uri".to_string(),
                post_logout.to_string(),
            ));
        }

        Ok(append_query(end_session_endpoint.as_str(), &params))
    }

    /// # Logout
    /// Calls the end session endpoint directly instead of handing the url to
    /// a browser. The raw response is returned; a redirecting provider
    /// leaves its target in the `location` field.
    ///
    /// - `http_client` - The http client to make the request
    /// - `access_token_hint` - Access token identifying the session
    /// - `post_logout_redirect_uri` - Optional url to return the browser to
    pub async fn logout<T>(
        &self,
        http_client: &T,
        access_token_hint: &str,
        post_logout_redirect_uri: Option<&str>,
    ) -> CidaasReturnType<HttpResponse>
    where
        T: CidaasHttpClient,
    {
        let url = self
            .end_session_url(http_client, access_token_hint, post_logout_redirect_uri)
            .await?;

        let url = url::Url::parse(&url).map_err(|_| {
            Box::new(CidaasClientError::new_discovery_error(
                "end_session_endpoint is not a valid url",
                None,
            ))
        })?;

        let request = HttpRequest::new()
            .url(url)
            .method(HttpMethod::POST)
            .expect_body(false)
            .expect_json_body(false);

        send_request(http_client, request).await
    }

    /// # Authorization Url
    /// Builds the url of the provider's hosted authorization page. The
    /// client id always comes from the configuration, `response_type`
    /// defaults to `code`, `scope` to `openid` and the redirect uri falls
    /// back to the configured one. A `state` is generated when none is
    /// supplied, and a `nonce` whenever the scope includes `openid` and none
    /// was supplied. Extra parameters are appended sorted by name.
    ///
    /// - `http_client` - The http client to make the discovery request
    /// - `params` - See [AuthorizationUrlParameters]
    pub async fn authorization_url<T>(
        &self,
        http_client: &T,
        params: AuthorizationUrlParameters,
    ) -> CidaasReturnType<String>
    where
        T: CidaasHttpClient,
    {
        let metadata = self.resolve_metadata(http_client).await?;

        let authorization_endpoint = endpoint_url(
            metadata.authorization_endpoint.as_ref(),
            "authorization_endpoint",
        )?;

        let scope = params.scope.unwrap_or_else(|| "openid".to_string());

        let redirect_uri = match params.redirect_uri.or_else(|| self.config.redirect_uri.clone())
        {
            Some(redirect_uri) => redirect_uri,
            None => {
                return Err(Box::new(CidaasClientError::new_missing_parameter_error(
                    "redirect_uri",
                )))
            }
        };

        let state = params.state.unwrap_or_else(generate_state);

        let mut query = vec![
            ("client_id".to_string(), self.config.client_id.clone()),
            (
                "response_type".to_string(),
                params
                    .response_type
                    .unwrap_or_else(|| "code".to_string()),
            ),
            ("scope".to_string(), scope.clone()),
            ("redirect_uri".to_string(), redirect_uri),
            ("state".to_string(), state),
        ];

        if scope.split(' ').any(|s| s == "openid") {
            query.push((
                "nonce".to_string(),
                params.nonce.unwrap_or_else(generate_nonce),
            ));
        } else if let Some(nonce) = params.nonce {
            query.push(("nonce".to_string(), nonce));
        }

        if let Some(view_type) = params.view_type {
            query.push(("view_type".to_string(), view_type));
        }

        if let Some(other) = params.other {
            let mut other = other.into_iter().collect::<Vec<(String, String)>>();
            other.sort();
            query.extend(other);
        }

        Ok(append_query(authorization_endpoint.as_str(), &query))
    }

    /// Authorization url presenting the hosted login page.
    pub async fn login_url<T>(
        &self,
        http_client: &T,
        mut params: AuthorizationUrlParameters,
    ) -> CidaasReturnType<String>
    where
        T: CidaasHttpClient,
    {
        params.view_type = Some("login".to_string());
        self.authorization_url(http_client, params).await
    }

    /// Authorization url presenting the hosted registration page.
    pub async fn register_url<T>(
        &self,
        http_client: &T,
        mut params: AuthorizationUrlParameters,
    ) -> CidaasReturnType<String>
    where
        T: CidaasHttpClient,
    {
        params.view_type = Some("register".to_string());
        self.authorization_url(http_client, params).await
    }

    /// # Get Registration Setup
    /// Fetches the registration field definitions the instance is configured
    /// with, localized via `locale`.
    ///
    /// - `http_client` - The http client to make the request
    /// - `request_id` - Request id binding the attempt
    /// - `locale` - Language of the field labels, e.g. `en`
    pub async fn get_registration_setup<T>(
        &self,
        http_client: &T,
        request_id: &str,
        locale: &str,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(request_id, "request_id")?;

        let base = self.service_url(self.paths.registration_setup)?;
        let url = append_query(
            base.as_str(),
            &[
                ("requestId".to_string(), request_id.to_string()),
                ("acceptlanguage".to_string(), locale.to_string()),
            ],
        );

        let url = url::Url::parse(&url).map_err(|_| {
            Box::new(CidaasClientError::new_config_error(
                "base_url must be an absolute url",
            ))
        })?;

        let request = HttpRequest::new().url(url).method(HttpMethod::GET);

        send_json(http_client, request).await
    }

    /// # Register
    /// Registers a new user with the supplied field values. When `fields`
    /// carries no `provider`, `self` is assumed: a direct registration
    /// rather than a social one.
    ///
    /// - `http_client` - The http client to make the request
    /// - `fields` - Field values per the registration setup
    /// - `request_id` - Request id binding the attempt
    pub async fn register<T>(
        &self,
        http_client: &T,
        mut fields: HashMap<String, Value>,
        request_id: &str,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(request_id, "request_id")?;

        fields
            .entry("provider".to_string())
            .or_insert_with(|| Value::String("self".to_string()));

        let body = serde_json::to_string(&fields).map_err(|e| {
            Box::new(CidaasClientError::new_config_error(&format!(
                "registration fields could not be serialized: {e}"
            )))
        })?;

        let request = HttpRequest::new()
            .url(self.service_url(self.paths.register)?)
            .method(HttpMethod::POST)
            .header("requestId", request_id)
            .json(body);

        send_json(http_client, request).await
    }

    /// # Initiate Reset Password
    /// Starts the password reset flow for `email`. The provider mails the
    /// user a code and answers with `data.reset_request_id`, the handle for
    /// the two follow-up steps.
    ///
    /// - `http_client` - The http client to make the request
    /// - `email` - Email of the account to reset
    /// - `request_id` - Request id binding the attempt
    pub async fn initiate_reset_password<T>(
        &self,
        http_client: &T,
        email: &str,
        request_id: &str,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(email, "email")?;
        require_non_empty(request_id, "request_id")?;

        let body = json!({
            "email": email,
            "processingType": "CODE",
            "requestId": request_id,
            "resetMedium": "email",
        });

        let request = HttpRequest::new()
            .url(self.service_url(self.paths.reset_password_initiate)?)
            .method(HttpMethod::POST)
            .json(body.to_string());

        send_json(http_client, request).await
    }

    /// # Handle Reset Password
    /// Validates the code the user received. On success the answer carries
    /// `data.exchangeId`, consumed by [Provider::reset_password].
    ///
    /// - `http_client` - The http client to make the request
    /// - `code` - The code the user received
    /// - `reset_request_id` - Handle from the initiate step
    pub async fn handle_reset_password<T>(
        &self,
        http_client: &T,
        code: &str,
        reset_request_id: &str,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(code, "code")?;
        require_non_empty(reset_request_id, "reset_request_id")?;

        let body = json!({
            "code": code,
            "resetRequestId": reset_request_id,
        });

        let request = HttpRequest::new()
            .url(self.service_url(self.paths.reset_password_validate)?)
            .method(HttpMethod::POST)
            .json(body.to_string());

        send_json(http_client, request).await
    }

    /// # Reset Password
    /// Accepts the new password, finishing the reset flow.
    ///
    /// - `http_client` - The http client to make the request
    /// - `params` - See [ResetPasswordParams]
    pub async fn reset_password<T>(
        &self,
        http_client: &T,
        params: ResetPasswordParams,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(&params.password, "password")?;
        require_non_empty(&params.exchange_id, "exchange_id")?;
        require_non_empty(&params.reset_request_id, "reset_request_id")?;

        let body = json!({
            "password": params.password,
            "confirmPassword": params.confirm_password,
            "exchangeId": params.exchange_id,
            "resetRequestId": params.reset_request_id,
        });

        let request = HttpRequest::new()
            .url(self.service_url(self.paths.reset_password_accept)?)
            .method(HttpMethod::POST)
            .json(body.to_string());

        send_json(http_client, request).await
    }

    /// # Change Password
    /// Changes the password of the logged in user identified by
    /// `access_token`.
    ///
    /// - `http_client` - The http client to make the request
    /// - `params` - See [ChangePasswordParams]
    /// - `access_token` - Access token of the user
    pub async fn change_password<T>(
        &self,
        http_client: &T,
        params: ChangePasswordParams,
        access_token: &str,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(access_token, "access_token")?;
        require_non_empty(&params.old_password, "old_password")?;
        require_non_empty(&params.new_password, "new_password")?;

        let body = json!({
            "old_password": params.old_password,
            "new_password": params.new_password,
            "confirm_password": params.confirm_password,
            "identityId": params.identity_id,
        });

        let request = HttpRequest::new()
            .url(self.service_url(self.paths.change_password)?)
            .method(HttpMethod::POST)
            .header("authorization", bearer_authorization(access_token))
            .json(body.to_string());

        send_json(http_client, request).await
    }

    /// # Update Profile
    /// Replaces profile fields of the user addressed by `sub`.
    ///
    /// - `http_client` - The http client to make the request
    /// - `sub` - Subject of the user
    /// - `fields` - Profile field values to write
    /// - `access_token` - Access token of the user
    pub async fn update_profile<T>(
        &self,
        http_client: &T,
        sub: &str,
        fields: HashMap<String, Value>,
        access_token: &str,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(sub, "sub")?;
        require_non_empty(access_token, "access_token")?;

        let body = serde_json::to_string(&fields).map_err(|e| {
            Box::new(CidaasClientError::new_config_error(&format!(
                "profile fields could not be serialized: {e}"
            )))
        })?;

        let path = format!("{}/{}", self.paths.update_profile, sub);

        let request = HttpRequest::new()
            .url(self.service_url(&path)?)
            .method(HttpMethod::PUT)
            .header("authorization", bearer_authorization(access_token))
            .json(body);

        send_json(http_client, request).await
    }

    /// # Initiate Mfa
    /// Starts a multi factor verification of the given type, e.g. `email`,
    /// `sms` or `totp`. The answer carries `data.exchange_id` for
    /// [Provider::authenticate_mfa].
    ///
    /// - `http_client` - The http client to make the request
    /// - `mfa_type` - The verification type
    /// - `params` - See [InitiateMfaParams]
    pub async fn initiate_mfa<T>(
        &self,
        http_client: &T,
        mfa_type: &str,
        params: InitiateMfaParams,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(mfa_type, "mfa_type")?;
        require_non_empty(&params.request_id, "request_id")?;

        let mut body = json!({
            "request_id": params.request_id,
            "usage_type": "MULTIFACTOR_AUTHENTICATION",
        });

        if let Some(sub) = params.sub {
            body["sub"] = Value::String(sub);
        }

        if let Some(email) = params.email {
            body["email"] = Value::String(email);
        }

        let path = format!("{}/{}", self.paths.mfa_initiate, mfa_type);

        let request = HttpRequest::new()
            .url(self.service_url(&path)?)
            .method(HttpMethod::POST)
            .json(body.to_string());

        send_json(http_client, request).await
    }

    /// # Authenticate Mfa
    /// Completes a multi factor verification with the code the user
    /// received.
    ///
    /// - `http_client` - The http client to make the request
    /// - `mfa_type` - The verification type used on initiation
    /// - `params` - See [AuthenticateMfaParams]
    /// - `access_token` - Optional access token to authenticate the call
    pub async fn authenticate_mfa<T>(
        &self,
        http_client: &T,
        mfa_type: &str,
        params: AuthenticateMfaParams,
        access_token: Option<&str>,
    ) -> CidaasReturnType<Value>
    where
        T: CidaasHttpClient,
    {
        require_non_empty(mfa_type, "mfa_type")?;
        require_non_empty(&params.exchange_id, "exchange_id")?;
        require_non_empty(&params.pass_code, "pass_code")?;

        let body = json!({
            "exchange_id": params.exchange_id,
            "pass_code": params.pass_code,
        });

        let path = format!("{}/{}", self.paths.mfa_authenticate, mfa_type);

        let mut request = HttpRequest::new()
            .url(self.service_url(&path)?)
            .method(HttpMethod::POST)
            .json(body.to_string());

        if let Some(access_token) = access_token {
            request = request.header("authorization", bearer_authorization(access_token));
        }

        send_json(http_client, request).await
    }
}
