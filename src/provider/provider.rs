use tokio::sync::OnceCell;
use url::Url;

use crate::helpers::convert_json_to;
use crate::types::{
    CidaasClientError, CidaasHttpClient, CidaasReturnType, HttpMethod, HttpRequest, ProviderConfig,
    ProviderMetadata, ServicePaths,
};

/// # Provider instance
/// The client for one Cidaas instance. Holds the validated configuration,
/// the fixed service path table and the memoized discovery document. All
/// operations take `&self`; the discovery cell is the only shared state
/// between concurrently running operations.
#[derive(Debug)]
pub struct Provider {
    pub(crate) config: ProviderConfig,
    pub(crate) paths: ServicePaths,
    metadata: OnceCell<Result<ProviderMetadata, CidaasClientError>>,
}

impl Provider {
    /// # Create a [Provider] instance
    ///
    /// Fails with a Config error when `base_url`, `client_id` or
    /// `client_secret` is empty, or when `base_url` is not an absolute url.
    /// Trailing slashes of `base_url` are stripped so endpoint
    /// concatenation never double-slashes. No network call is made here;
    /// discovery happens on the first operation that needs an endpoint.
    ///
    /// ### *Example:*
    ///
    /// ```rust
    ///     let config = ProviderConfig::new(
    ///         "https://auth.example.com",
    ///         "client-id",
    ///         "client-secret",
    ///     )
    ///     .redirect_uri("https://rp.example.com/cb");
    ///
    ///     let provider = Provider::new(config).unwrap();
    /// ```
    pub fn new(mut config: ProviderConfig) -> CidaasReturnType<Self> {
        if config.base_url.trim().is_empty() {
            return Err(Box::new(CidaasClientError::new_config_error(
                "base_url is not specified",
            )));
        }

        if config.client_id.trim().is_empty() {
            return Err(Box::new(CidaasClientError::new_config_error(
                "client_id is not specified",
            )));
        }

        if config.client_secret.trim().is_empty() {
            return Err(Box::new(CidaasClientError::new_config_error(
                "client_secret is not specified",
            )));
        }

        config.base_url = config.base_url.trim_end_matches('/').to_string();

        if Url::parse(&config.base_url).is_err() {
            return Err(Box::new(CidaasClientError::new_config_error(
                "base_url must be an absolute url",
            )));
        }

        Ok(Self {
            config,
            paths: ServicePaths::default(),
            metadata: OnceCell::new(),
        })
    }

    /// # Resolve the provider metadata
    ///
    /// Performs the discovery GET at most once over the lifetime of this
    /// instance. Concurrent callers awaiting an unresolved document all
    /// observe the same single in-flight fetch; once resolved, the outcome
    /// (success or failure) is served from memory and never refreshed.
    ///
    /// - `http_client` - The http client to make the request
    pub async fn resolve_metadata<T>(
        &self,
        http_client: &T,
    ) -> CidaasReturnType<&ProviderMetadata>
    where
        T: CidaasHttpClient,
    {
        let outcome = self
            .metadata
            .get_or_init(|| self.fetch_metadata(http_client))
            .await;

        match outcome {
            Ok(metadata) => Ok(metadata),
            Err(err) => Err(Box::new(err.clone())),
        }
    }

    async fn fetch_metadata<T>(&self, http_client: &T) -> Result<ProviderMetadata, CidaasClientError>
    where
        T: CidaasHttpClient,
    {
        let url = match self.service_url(self.paths.well_known) {
            Ok(url) => url,
            Err(err) => {
                return Err(CidaasClientError::new_discovery_error(
                    &format!("could not build the discovery url: {err:?}"),
                    None,
                ))
            }
        };

        let request = HttpRequest::new()
            .url(url)
            .method(HttpMethod::GET)
            .header("accept", "application/json");

        let response = match http_client.request(request).await {
            Ok(response) => response,
            Err(transport_error) => {
                return Err(CidaasClientError::new_discovery_error(
                    &format!("could not fetch the discovery document: {transport_error}"),
                    None,
                ))
            }
        };

        if response.status_code >= 400 {
            return Err(CidaasClientError::new_discovery_error(
                &format!(
                    "discovery request failed with status {}",
                    response.status_code
                ),
                Some(response),
            ));
        }

        let body = match &response.body {
            Some(body) => body.clone(),
            None => {
                return Err(CidaasClientError::new_discovery_error(
                    "discovery response had no body",
                    Some(response),
                ))
            }
        };

        let metadata = match convert_json_to::<ProviderMetadata>(&body) {
            Ok(metadata) => metadata,
            Err(decode_error) => {
                return Err(CidaasClientError::new_discovery_error(
                    &format!("invalid provider metadata: {decode_error}"),
                    Some(response),
                ))
            }
        };

        if let Some(endpoint) = metadata.missing_endpoint() {
            return Err(CidaasClientError::new_discovery_error(
                &format!("provider metadata is missing {endpoint}"),
                Some(response),
            ));
        }

        Ok(metadata)
    }

    /// Builds an absolute url for one of the fixed service paths.
    pub(crate) fn service_url(&self, path: &str) -> CidaasReturnType<Url> {
        Url::parse(&format!("{}{}", self.config.base_url, path)).map_err(|_| {
            Box::new(CidaasClientError::new_config_error(
                "base_url must be an absolute url",
            ))
        })
    }
}
