#![warn(missing_docs)]
//! # Cidaas Client
//!
//! This crate is a server side SDK for the [Cidaas](https://www.cidaas.com)
//! identity provider: OIDC discovery, token grants and the Cidaas specific
//! user services (credential login, registration, password reset, profile,
//! multi factor verification).
//!
//! Tokens are treated as opaque strings; validation happens at the provider
//! via introspection, never locally.
//!
//! ## Provider
//!
//! ### New Instance
//!
//! - [provider::Provider::new]
//!
//! ### Urls
//! - [provider::Provider::authorization_url]
//! - [provider::Provider::login_url]
//! - [provider::Provider::register_url]
//! - [provider::Provider::end_session_url]
//!
//! ### Operations
//! - [provider::Provider::get_request_id]
//! - [provider::Provider::login_with_credentials]
//! - [provider::Provider::get_access_token]
//! - [provider::Provider::get_user_profile]
//! - [provider::Provider::introspect_token]
//! - [provider::Provider::validate_access_token]
//! - [provider::Provider::logout]
//! - [provider::Provider::get_registration_setup]
//! - [provider::Provider::register]
//! - [provider::Provider::initiate_reset_password]
//! - [provider::Provider::handle_reset_password]
//! - [provider::Provider::reset_password]
//! - [provider::Provider::change_password]
//! - [provider::Provider::update_profile]
//! - [provider::Provider::initiate_mfa]
//! - [provider::Provider::authenticate_mfa]
//!
//! ### Flows
//! - [provider::Provider::login_with_credentials_flow]
//! - [provider::Provider::register_flow]
//! - [provider::Provider::start_reset_password]
//! - [provider::Provider::complete_reset_password]

pub mod helpers;
#[cfg(feature = "http_client")]
mod http_client;
pub mod provider;
/// TokenSet Module
pub mod tokenset;
pub mod types;

#[cfg(feature = "http_client")]
pub use http_client::DefaultHttpClient;

/// Re exports from the crate
pub mod re_exports {
    pub use serde_json::{self, json, Value};
    pub use url;
}
