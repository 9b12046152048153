/// # ProviderConfig
/// Configuration for a [crate::provider::Provider] instance. Immutable after
/// construction; `base_url`, `client_id` and `client_secret` must be
/// non-empty or [crate::provider::Provider::new] fails.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Base url of the Cidaas instance, e.g. `https://auth.example.com`.
    /// Trailing slashes are stripped on construction.
    pub base_url: String,
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect uri registered with the client. Required only for the
    /// browser redirect and authorization code flows.
    pub redirect_uri: Option<String>,
    /// Enables verbose behavior in the default transport
    pub debug: bool,
}

impl ProviderConfig {
    /// Creates a config with the three required values set.
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: None,
            debug: false,
        }
    }

    /// Sets the redirect uri.
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Sets the debug flag.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
