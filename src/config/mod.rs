//! Configuration types for the Cognite client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: Immutable settings shared by every API call
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ProjectName`], [`ApiToken`], [`ClientName`], [`BaseUrl`]: validated newtypes
//! - [`ApiVersion`]: The CDF API version to use
//!
//! # Example
//!
//! ```rust
//! use cognite_sdk::{ApiToken, ClientConfig, ClientName, ProjectName};
//!
//! let config = ClientConfig::builder()
//!     .project(ProjectName::new("my-project").unwrap())
//!     .token(ApiToken::new("token").unwrap())
//!     .client_name(ClientName::new("asset-loader").unwrap())
//!     .max_workers(4)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_workers(), 4);
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{ApiToken, BaseUrl, ClientName, ProjectName};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Maximum number of items the API accepts in one create or update request.
pub const MAX_CREATE_LIMIT: usize = 1000;

/// Default number of concurrent requests per batch.
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`CogniteClient`](crate::CogniteClient).
///
/// The value is immutable once built and is passed explicitly to every
/// constructor that needs it; there is no process-wide default config.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    project: ProjectName,
    token: ApiToken,
    client_name: ClientName,
    base_url: BaseUrl,
    api_version: ApiVersion,
    max_workers: usize,
    timeout: Duration,
    max_tries: u32,
    create_limit: usize,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the project name.
    #[must_use]
    pub const fn project(&self) -> &ProjectName {
        &self.project
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn token(&self) -> &ApiToken {
        &self.token
    }

    /// Returns the client name.
    #[must_use]
    pub const fn client_name(&self) -> &ClientName {
        &self.client_name
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the maximum number of concurrent requests.
    #[must_use]
    pub const fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns how many times a retryable request is attempted.
    #[must_use]
    pub const fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Returns the maximum number of items per create/update request.
    #[must_use]
    pub const fn create_limit(&self) -> usize {
        self.create_limit
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Required fields are `project`, `token` and `client_name`.
///
/// # Defaults
///
/// - `base_url`: `https://api.cognitedata.com`
/// - `api_version`: `v1`
/// - `max_workers`: 10
/// - `timeout`: 30 seconds
/// - `max_tries`: 1 (no retries)
/// - `create_limit`: 1000
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    project: Option<ProjectName>,
    token: Option<ApiToken>,
    client_name: Option<ClientName>,
    base_url: Option<BaseUrl>,
    api_version: Option<ApiVersion>,
    max_workers: Option<usize>,
    timeout: Option<Duration>,
    max_tries: Option<u32>,
    create_limit: Option<usize>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project (required).
    #[must_use]
    pub fn project(mut self, project: ProjectName) -> Self {
        self.project = Some(project);
        self
    }

    /// Sets the bearer token (required).
    #[must_use]
    pub fn token(mut self, token: ApiToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the client name (required).
    #[must_use]
    pub fn client_name(mut self, name: ClientName) -> Self {
        self.client_name = Some(name);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the maximum number of concurrent requests.
    #[must_use]
    pub const fn max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how many times a retryable request is attempted.
    ///
    /// Values below 1 are treated as 1.
    #[must_use]
    pub const fn max_tries(mut self, tries: u32) -> Self {
        self.max_tries = Some(tries);
        self
    }

    /// Sets the maximum number of items per create/update request.
    #[must_use]
    pub const fn create_limit(mut self, limit: usize) -> Self {
        self.create_limit = Some(limit);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if a required field is
    /// unset, [`ConfigError::InvalidMaxWorkers`] if `max_workers` is zero, and
    /// [`ConfigError::InvalidLimit`] if `create_limit` is outside
    /// `1..=MAX_CREATE_LIMIT`.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let project = self
            .project
            .ok_or(ConfigError::MissingRequiredField { field: "project" })?;
        let token = self
            .token
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;
        let client_name = self.client_name.ok_or(ConfigError::MissingRequiredField {
            field: "client_name",
        })?;

        let max_workers = self.max_workers.unwrap_or(DEFAULT_MAX_WORKERS);
        if max_workers == 0 {
            return Err(ConfigError::InvalidMaxWorkers { value: max_workers });
        }

        let create_limit = self.create_limit.unwrap_or(MAX_CREATE_LIMIT);
        if !(1..=MAX_CREATE_LIMIT).contains(&create_limit) {
            return Err(ConfigError::InvalidLimit {
                field: "create_limit",
                value: create_limit,
                max: MAX_CREATE_LIMIT,
            });
        }

        Ok(ClientConfig {
            project,
            token,
            client_name,
            base_url: self.base_url.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_default(),
            max_workers,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            max_tries: self.max_tries.unwrap_or(1).max(1),
            create_limit,
        })
    }
}
