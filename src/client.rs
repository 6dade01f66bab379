//! The client entry point.

use crate::assets::AssetsApi;
use crate::clients::{HttpClient, HttpError};
use crate::config::ClientConfig;

/// Client for one CDF project.
///
/// Owns its configuration and HTTP client; resource APIs borrow both.
///
/// # Example
///
/// ```rust
/// use cognite_sdk::{ApiToken, ClientConfig, ClientName, CogniteClient, ProjectName};
///
/// let config = ClientConfig::builder()
///     .project(ProjectName::new("my-project").unwrap())
///     .token(ApiToken::new("token").unwrap())
///     .client_name(ClientName::new("asset-loader").unwrap())
///     .build()
///     .unwrap();
///
/// let client = CogniteClient::new(config).unwrap();
/// assert_eq!(client.config().project().as_ref(), "my-project");
/// ```
#[derive(Debug, Clone)]
pub struct CogniteClient {
    config: ClientConfig,
    http: HttpClient,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CogniteClient>();
};

impl CogniteClient {
    /// Creates a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let http = HttpClient::new(&config)?;
        tracing::debug!(
            "Created client for project '{}' at {}",
            config.project(),
            config.base_url().as_ref()
        );
        Ok(Self { config, http })
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the underlying HTTP client for raw requests.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    #[must_use]
    pub const fn assets(&self) -> AssetsApi<'_> {
        AssetsApi::new(&self.http, &self.config)
    }
}
