use std::{cmp::max, collections::HashMap, num::Wrapping};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::helpers::now;

/// # TokenSetParams
/// The raw shape of a successful token endpoint response. `access_token` is
/// the one field the provider always returns on success; everything else is
/// grant and scope dependent.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TokenSetParams {
    /// `access_token`
    pub access_token: String,
    /// `token_type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// `id_token` - treated as an opaque string, never verified locally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    /// `refresh_token` - present only when `offline_access` was granted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// `expires_in` - Access token expiration in (seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    /// `expires_at` - Access token expiration timestamp, seconds since the epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// `sub` of the user the tokens were issued for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// `scope`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Everything else the provider returned, e.g. `identity_id`
    #[serde(flatten)]
    pub other: HashMap<String, Value>,
}

/// # TokenSet
/// The tokens obtained from a successful token endpoint grant. The SDK does
/// not persist token sets; the caller owns storage and refresh scheduling.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenSet {
    access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, Value>,
}

impl TokenSet {
    /// # Create a [TokenSet] instance
    ///
    /// When only `expires_in` is known, `expires_at` is computed from the
    /// current time.
    pub fn new(params: TokenSetParams) -> Self {
        let mut tokenset = Self {
            access_token: params.access_token,
            token_type: params.token_type,
            id_token: params.id_token,
            refresh_token: params.refresh_token,
            expires_in: params.expires_in,
            expires_at: params.expires_at,
            sub: params.sub,
            scope: params.scope,
            other: params.other,
        };

        if params.expires_at.is_none() {
            if let Some(e) = params.expires_in {
                tokenset.expires_at = Some((Wrapping(now()) + Wrapping(e)).0);
            }
        }

        if let Some(e) = params.expires_in {
            if e < 0 {
                tokenset.expires_in = Some(0);
            }
        }

        tokenset
    }

    /// Returns if the set is expired or not
    pub fn expired(&self) -> bool {
        if let Some(e) = self.expires_in_remaining() {
            return e == 0;
        }
        false
    }

    /// Gets the access token
    pub fn get_access_token(&self) -> &str {
        &self.access_token
    }

    /// Gets the access token type
    pub fn get_token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// Gets the raw id token
    pub fn get_id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }

    /// Gets the refresh token
    pub fn get_refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Gets the expires in (seconds)
    pub fn get_expires_in(&self) -> Option<i64> {
        self.expires_in
    }

    /// Gets the expiration timestamp, seconds since the epoch
    pub fn get_expires_at(&self) -> Option<i64> {
        self.expires_at
    }

    /// Gets the sub of the user
    pub fn get_sub(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Gets the scope
    pub fn get_scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Gets the other fields
    pub fn get_other(&self) -> &HashMap<String, Value> {
        &self.other
    }

    fn expires_in_remaining(&self) -> Option<i64> {
        self.expires_at
            .map(|e| max((Wrapping(e) - Wrapping(now())).0, 0))
    }
}

#[cfg(test)]
#[path = "./tests/tokenset_tests.rs"]
mod tokenset_tests;
