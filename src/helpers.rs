//! Small helpers: time, random state/nonce generation, encodings.

use std::collections::HashMap;
use std::fmt::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose, Engine};
use rand::Rng;
use serde::Deserialize;
use url::form_urlencoded;

/// Gets a Unix Timestamp in seconds. Uses [`SystemTime::now`]
pub fn now() -> i64 {
    let start = SystemTime::now();
    start
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs() as i64
}

/// Generates a hex encoded random string using [rand::thread_rng]. The
/// default length is 32 characters, produced from 16 random bytes; hex
/// doubles the byte count, so half of `length` bytes are drawn.
pub fn generate_random_hex(length: Option<usize>) -> String {
    let bytes_to_generate = length.unwrap_or(32) / 2;

    let mut random_bytes = vec![0u8; bytes_to_generate];
    rand::thread_rng().fill(random_bytes.as_mut_slice());

    let mut hex = String::with_capacity(bytes_to_generate * 2);
    for byte in random_bytes {
        write!(hex, "{byte:02x}").expect("writing to a String cannot fail");
    }

    hex
}

/// Generates a random string as the state. Uses [generate_random_hex] under the hood.
pub fn generate_state() -> String {
    generate_random_hex(None)
}

/// Generates a random string as the nonce. Uses [generate_random_hex] under the hood.
pub fn generate_nonce() -> String {
    generate_random_hex(None)
}

/// Converts plain JSON to a struct/enum that impl's serde's [Deserialize].
/// Uses [serde_json::from_str] under the hood; the decode error message is
/// returned on failure.
pub(crate) fn convert_json_to<T: for<'a> Deserialize<'a>>(plain: &str) -> Result<T, String> {
    serde_json::from_str::<T>(plain).map_err(|e| e.to_string())
}

/// Basic authorization header value for the given client credentials.
pub(crate) fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}

pub(crate) fn string_map_to_form_url_encoded(map: &HashMap<String, String>) -> String {
    let mut form_urlencoded = form_urlencoded::Serializer::new(String::new());
    for (k, v) in map {
        form_urlencoded.append_pair(k, v);
    }

    form_urlencoded.finish()
}

#[cfg(test)]
pub(crate) fn form_url_encoded_to_string_map(string: &str) -> HashMap<String, String> {
    form_urlencoded::parse(string.as_bytes())
        .map(|(x, y)| (x.to_string(), y.to_string()))
        .collect()
}

/// Appends `params` to `url` as a query string, each value url-encoded
/// individually, preserving the order of the pairs. Uses `?` when the url
/// has no query yet, `&` otherwise.
pub(crate) fn append_query(url: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<String>>()
        .join("&");

    let glue = if url.contains('?') { '&' } else { '?' };

    format!("{url}{glue}{query}")
}

#[cfg(test)]
#[path = "./tests/helpers_tests.rs"]
mod helpers_tests;
