use std::collections::HashMap;

use serde_json::{json, Value};

use crate::helpers::basic_authorization;
use crate::tests::test_http_client::{TestHttpClient, TestHttpReqRes};
use crate::types::{
    AuthenticateMfaParams, ChangePasswordParams, CredentialsLoginParams, HttpMethod,
    InitiateMfaParams, IntrospectionParams, ResetPasswordParams,
};

use super::{discovery_req_res, test_provider, test_provider_without_redirect};

fn json_post(url: &str) -> TestHttpReqRes {
    TestHttpReqRes::new(url)
        .assert_request_method(HttpMethod::POST)
        .assert_request_header("content-type", vec!["application/json".to_string()])
}

#[tokio::test]
async fn mints_a_request_id() {
    let provider = test_provider();
    let http_client = json_post("https://auth.test.com/authz-srv/authrequest/authz/generate")
        .assert_request_body(
            json!({
                "client_id": "test-client",
                "redirect_uri": "https://rp.test.com/cb",
                "response_type": "code",
                "scope": "openid",
            })
            .to_string(),
        )
        .ignore_request_body_key("nonce")
        .set_response_body(
            json!({"success": true, "status": 200, "data": {"requestId": "req-1"}}).to_string(),
        )
        .build();

    let request_id = provider.get_request_id(&http_client, None).await.unwrap();

    assert_eq!("req-1", request_id);

    http_client.assert();
}

#[tokio::test]
async fn request_id_requires_a_configured_redirect_uri() {
    let provider = test_provider_without_redirect();
    let http_client = TestHttpClient::new();

    let err = provider
        .get_request_id(&http_client, None)
        .await
        .unwrap_err();

    assert!(err.is_missing_parameter_error());
    assert_eq!("redirect_uri", err.missing_parameter_error().parameter);
}

#[tokio::test]
async fn an_answer_without_a_request_id_is_malformed() {
    let provider = test_provider();
    let http_client = json_post("https://auth.test.com/authz-srv/authrequest/authz/generate")
        .assert_request_body(
            json!({
                "client_id": "test-client",
                "redirect_uri": "https://rp.test.com/cb",
                "response_type": "code",
                "scope": "openid",
            })
            .to_string(),
        )
        .ignore_request_body_key("nonce")
        .set_response_body(json!({"success": true, "status": 200, "data": {}}).to_string())
        .build();

    let err = provider
        .get_request_id(&http_client, None)
        .await
        .unwrap_err();

    assert!(err.is_malformed_response_error());
}

#[tokio::test]
async fn logs_in_with_credentials() {
    let provider = test_provider();
    let http_client = json_post("https://auth.test.com/login-srv/login/sdk")
        .assert_request_body(
            json!({
                "username": "u@test.com",
                "username_type": "email",
                "password": "secret",
                "requestId": "req-1",
            })
            .to_string(),
        )
        .set_response_body(
            json!({"success": true, "status": 200, "data": {"code": "CODE", "sub": "sub-1"}})
                .to_string(),
        )
        .build();

    let login = provider
        .login_with_credentials(
            &http_client,
            CredentialsLoginParams {
                username: "u@test.com".to_string(),
                username_type: "email".to_string(),
                password: "secret".to_string(),
                request_id: "req-1".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(
        Some("CODE"),
        login.pointer("/data/code").and_then(Value::as_str)
    );

    http_client.assert();
}

#[tokio::test]
async fn fetches_the_user_profile() {
    let provider = test_provider();
    let http_client = TestHttpClient::new().add(discovery_req_res()).add(
        TestHttpReqRes::new("https://auth.test.com/users-srv/userinfo")
            .assert_request_method(HttpMethod::POST)
            .assert_request_header("authorization", vec!["Bearer AT".to_string()])
            .set_response_body(
                json!({"sub": "sub-1", "email": "u@test.com", "given_name": "U"}).to_string(),
            ),
    );

    let profile = provider
        .get_user_profile(&http_client, "AT", None)
        .await
        .unwrap();

    assert_eq!(Some("sub-1"), profile.get("sub").and_then(Value::as_str));

    http_client.assert();
}

#[tokio::test]
async fn addresses_a_profile_by_sub() {
    let provider = test_provider();
    let http_client = TestHttpClient::new().add(discovery_req_res()).add(
        TestHttpReqRes::new("https://auth.test.com/users-srv/userinfo/sub-1")
            .assert_request_method(HttpMethod::POST)
            .assert_request_header("authorization", vec!["Bearer AT".to_string()])
            .set_response_body(json!({"sub": "sub-1"}).to_string()),
    );

    provider
        .get_user_profile(&http_client, "AT", Some("sub-1"))
        .await
        .unwrap();

    http_client.assert();
}

#[tokio::test]
async fn introspects_with_basic_auth_by_default() {
    let provider = test_provider();
    let http_client = TestHttpClient::new().add(discovery_req_res()).add(
        json_post("https://auth.test.com/token-srv/introspect")
            .assert_request_header(
                "authorization",
                vec![basic_authorization("test-client", "test-secret")],
            )
            .assert_request_body(
                json!({"token": "AT", "token_type_hint": "access_token"}).to_string(),
            )
            .set_response_body(json!({"active": true, "sub": "sub-1"}).to_string()),
    );

    let introspection = provider
        .introspect_token(&http_client, IntrospectionParams::new("AT"), None)
        .await
        .unwrap();

    assert_eq!(Some(true), introspection.get("active").and_then(Value::as_bool));

    http_client.assert();
}

#[tokio::test]
async fn introspects_with_a_bearer_api_token() {
    let provider = test_provider();
    let http_client = TestHttpClient::new().add(discovery_req_res()).add(
        json_post("https://auth.test.com/token-srv/introspect")
            .assert_request_header("authorization", vec!["Bearer API".to_string()])
            .assert_request_body(
                json!({"token": "RT", "token_type_hint": "refresh_token"}).to_string(),
            )
            .set_response_body(json!({"active": false}).to_string()),
    );

    provider
        .introspect_token(
            &http_client,
            IntrospectionParams {
                token: "RT".to_string(),
                token_type_hint: Some("refresh_token".to_string()),
            },
            Some("API"),
        )
        .await
        .unwrap();

    http_client.assert();
}

#[tokio::test]
async fn an_empty_token_fails_before_any_request() {
    let provider = test_provider();
    let http_client = TestHttpClient::new();

    let err = provider
        .introspect_token(&http_client, IntrospectionParams::new(""), None)
        .await
        .unwrap_err();

    assert!(err.is_missing_parameter_error());
    assert_eq!("token", err.missing_parameter_error().parameter);
}

#[tokio::test]
async fn validate_access_token_reduces_to_the_active_flag() {
    let provider = test_provider();
    let http_client = TestHttpClient::new().add(discovery_req_res()).add(
        json_post("https://auth.test.com/token-srv/introspect")
            .assert_request_header(
                "authorization",
                vec![basic_authorization("test-client", "test-secret")],
            )
            .assert_request_body(
                json!({"token": "AT", "token_type_hint": "access_token"}).to_string(),
            )
            .set_response_body(json!({"active": false}).to_string()),
    );

    let active = provider
        .validate_access_token(&http_client, "AT", None)
        .await
        .unwrap();

    assert_eq!(false, active);

    http_client.assert();
}

#[tokio::test]
async fn changes_the_password() {
    let provider = test_provider();
    let http_client = json_post("https://auth.test.com/users-srv/changepassword")
        .assert_request_header("authorization", vec!["Bearer AT".to_string()])
        .assert_request_body(
            json!({
                "old_password": "old",
                "new_password": "new",
                "confirm_password": "new",
                "identityId": "idn-1",
            })
            .to_string(),
        )
        .set_response_body(json!({"success": true, "status": 200}).to_string())
        .build();

    provider
        .change_password(
            &http_client,
            ChangePasswordParams {
                old_password: "old".to_string(),
                new_password: "new".to_string(),
                confirm_password: "new".to_string(),
                identity_id: "idn-1".to_string(),
            },
            "AT",
        )
        .await
        .unwrap();

    http_client.assert();
}

#[tokio::test]
async fn a_wrong_old_password_is_an_api_error() {
    let provider = test_provider();
    let http_client = json_post("https://auth.test.com/users-srv/changepassword")
        .assert_request_header("authorization", vec!["Bearer AT".to_string()])
        .assert_request_body(
            json!({
                "old_password": "wrong",
                "new_password": "new",
                "confirm_password": "new",
                "identityId": "idn-1",
            })
            .to_string(),
        )
        .set_response_status_code(417)
        .set_response_body(
            json!({
                "success": false,
                "status": 417,
                "error": {"code": 10009, "error": "given old password is not matched"}
            })
            .to_string(),
        )
        .build();

    let err = provider
        .change_password(
            &http_client,
            ChangePasswordParams {
                old_password: "wrong".to_string(),
                new_password: "new".to_string(),
                confirm_password: "new".to_string(),
                identity_id: "idn-1".to_string(),
            },
            "AT",
        )
        .await
        .unwrap_err();

    assert!(err.is_api_error());

    let api_error = err.api_error();

    assert_eq!(417, api_error.http_status);
    assert_eq!(Some(10009), api_error.provider_error_code);
    assert!(api_error.raw_body.as_deref().unwrap().contains("10009"));

    http_client.assert();
}

#[tokio::test]
async fn fetches_the_registration_setup() {
    let provider = test_provider();
    let http_client = TestHttpReqRes::new(
        "https://auth.test.com/registration-setup-srv/public/list?requestId=req-1&acceptlanguage=en",
    )
    .assert_request_method(HttpMethod::GET)
    .set_response_body(
        json!({
            "success": true,
            "status": 200,
            "data": [
                {"fieldKey": "email", "required": true},
                {"fieldKey": "password", "required": true}
            ]
        })
        .to_string(),
    )
    .build();

    let setup = provider
        .get_registration_setup(&http_client, "req-1", "en")
        .await
        .unwrap();

    assert!(setup.pointer("/data").and_then(Value::as_array).is_some());

    http_client.assert();
}

#[tokio::test]
async fn registers_a_user_as_a_self_provider() {
    let provider = test_provider();
    let http_client = json_post("https://auth.test.com/users-srv/register")
        .assert_request_header("requestId", vec!["req-1".to_string()])
        .assert_request_body(
            json!({
                "email": "u@test.com",
                "password": "secret",
                "password_echo": "secret",
                "provider": "self",
            })
            .to_string(),
        )
        .set_response_body(
            json!({"success": true, "status": 200, "data": {"sub": "sub-1"}}).to_string(),
        )
        .build();

    let fields = HashMap::from([
        ("email".to_string(), json!("u@test.com")),
        ("password".to_string(), json!("secret")),
        ("password_echo".to_string(), json!("secret")),
    ]);

    let registered = provider
        .register(&http_client, fields, "req-1")
        .await
        .unwrap();

    assert_eq!(
        Some("sub-1"),
        registered.pointer("/data/sub").and_then(Value::as_str)
    );

    http_client.assert();
}

#[tokio::test]
async fn runs_the_reset_password_steps() {
    let provider = test_provider();

    let http_client = json_post("https://auth.test.com/users-srv/resetpassword/initiate")
        .assert_request_body(
            json!({
                "email": "u@test.com",
                "processingType": "CODE",
                "requestId": "req-1",
                "resetMedium": "email",
            })
            .to_string(),
        )
        .set_response_body(
            json!({"success": true, "status": 200, "data": {"reset_request_id": "rrid-1"}})
                .to_string(),
        )
        .build();

    let initiated = provider
        .initiate_reset_password(&http_client, "u@test.com", "req-1")
        .await
        .unwrap();

    assert_eq!(
        Some("rrid-1"),
        initiated
            .pointer("/data/reset_request_id")
            .and_then(Value::as_str)
    );

    http_client.assert();

    let http_client = json_post("https://auth.test.com/users-srv/resetpassword/validatecode")
        .assert_request_body(json!({"code": "1234", "resetRequestId": "rrid-1"}).to_string())
        .set_response_body(
            json!({"success": true, "status": 200, "data": {"exchangeId": "ex-1"}}).to_string(),
        )
        .build();

    provider
        .handle_reset_password(&http_client, "1234", "rrid-1")
        .await
        .unwrap();

    http_client.assert();

    let http_client = json_post("https://auth.test.com/users-srv/resetpassword/accept")
        .assert_request_body(
            json!({
                "password": "new",
                "confirmPassword": "new",
                "exchangeId": "ex-1",
                "resetRequestId": "rrid-1",
            })
            .to_string(),
        )
        .set_response_body(json!({"success": true, "status": 200}).to_string())
        .build();

    provider
        .reset_password(
            &http_client,
            ResetPasswordParams {
                password: "new".to_string(),
                confirm_password: "new".to_string(),
                exchange_id: "ex-1".to_string(),
                reset_request_id: "rrid-1".to_string(),
            },
        )
        .await
        .unwrap();

    http_client.assert();
}

#[tokio::test]
async fn updates_the_profile() {
    let provider = test_provider();
    let http_client = TestHttpReqRes::new("https://auth.test.com/users-srv/user/profile/sub-1")
        .assert_request_method(HttpMethod::PUT)
        .assert_request_header("content-type", vec!["application/json".to_string()])
        .assert_request_header("authorization", vec!["Bearer AT".to_string()])
        .assert_request_body(json!({"given_name": "New Name"}).to_string())
        .set_response_body(json!({"success": true, "status": 200}).to_string())
        .build();

    let fields = HashMap::from([("given_name".to_string(), json!("New Name"))]);

    provider
        .update_profile(&http_client, "sub-1", fields, "AT")
        .await
        .unwrap();

    http_client.assert();
}

#[tokio::test]
async fn logs_out_via_the_end_session_endpoint() {
    let provider = test_provider();
    let http_client = TestHttpClient::new().add(discovery_req_res()).add(
        TestHttpReqRes::new(
            "https://auth.test.com/session/end_session?access_token_hint=TOKEN&post_logout_redirect_uri=https%3A%2F%2Frp.test.com",
        )
        .assert_request_method(HttpMethod::POST)
        .set_response_status_code(302)
        .set_response_location_header("https://rp.test.com"),
    );

    let response = provider
        .logout(&http_client, "TOKEN", Some("https://rp.test.com"))
        .await
        .unwrap();

    assert_eq!(302, response.status_code);
    assert_eq!(Some("https://rp.test.com"), response.location.as_deref());

    http_client.assert();
}

#[tokio::test]
async fn initiates_and_authenticates_mfa() {
    let provider = test_provider();

    let http_client =
        json_post("https://auth.test.com/verification-srv/v2/authenticate/initiate/email")
            .assert_request_body(
                json!({
                    "request_id": "req-1",
                    "usage_type": "MULTIFACTOR_AUTHENTICATION",
                    "email": "u@test.com",
                })
                .to_string(),
            )
            .set_response_body(
                json!({"success": true, "status": 200, "data": {"exchange_id": "ex-1"}})
                    .to_string(),
            )
            .build();

    let initiated = provider
        .initiate_mfa(
            &http_client,
            "email",
            InitiateMfaParams {
                request_id: "req-1".to_string(),
                sub: None,
                email: Some("u@test.com".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(
        Some("ex-1"),
        initiated
            .pointer("/data/exchange_id")
            .and_then(Value::as_str)
    );

    http_client.assert();

    let http_client =
        json_post("https://auth.test.com/verification-srv/v2/authenticate/authenticate/email")
            .assert_request_header("authorization", vec!["Bearer AT".to_string()])
            .assert_request_body(
                json!({"exchange_id": "ex-1", "pass_code": "1234"}).to_string(),
            )
            .set_response_body(
                json!({"success": true, "status": 200, "data": {"code": "CODE"}}).to_string(),
            )
            .build();

    provider
        .authenticate_mfa(
            &http_client,
            "email",
            AuthenticateMfaParams {
                exchange_id: "ex-1".to_string(),
                pass_code: "1234".to_string(),
            },
            Some("AT"),
        )
        .await
        .unwrap();

    http_client.assert();
}
