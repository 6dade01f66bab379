//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated CDF project name.
///
/// The name is used verbatim in request paths (percent-encoded by the HTTP
/// client), so only emptiness is rejected here.
///
/// # Example
///
/// ```rust
/// use cognite_sdk::ProjectName;
///
/// let project = ProjectName::new("publicdata").unwrap();
/// assert_eq!(project.as_ref(), "publicdata");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a new validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyProject`] if the name is empty or blank.
    pub fn new(project: impl Into<String>) -> Result<Self, ConfigError> {
        let project = project.into();
        if project.trim().is_empty() {
            return Err(ConfigError::EmptyProject);
        }
        Ok(Self(project))
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated bearer token.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `ApiToken(*****)`.
///
/// # Example
///
/// ```rust
/// use cognite_sdk::ApiToken;
///
/// let token = ApiToken::new("eyJ0eXAi...").unwrap();
/// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new validated token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyApiToken);
        }
        Ok(Self(token))
    }

    /// Returns the value for the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// The name identifying the calling application, sent as `x-cdp-app`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientName(String);

impl ClientName {
    /// Creates a new validated client name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientName`] if the name is empty or blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyClientName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated API base URL.
///
/// Must start with `http://` or `https://` and have a non-empty host.
/// Trailing slashes are stripped so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use cognite_sdk::BaseUrl;
///
/// let url = BaseUrl::new("https://westeurope-1.cognitedata.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://westeurope-1.cognitedata.com");
/// assert_eq!(url.host_name(), "westeurope-1.cognitedata.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// The public CDF cluster.
    pub const DEFAULT: &'static str = "https://api.cognitedata.com";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no http(s)
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));
        match rest {
            Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {
                Ok(Self(trimmed.to_string()))
            }
            _ => Err(ConfigError::InvalidBaseUrl { url }),
        }
    }

    /// Returns the host portion (including any port) of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        let rest = self
            .0
            .split_once("://")
            .map_or(self.0.as_str(), |(_, rest)| rest);
        rest.split('/').next().unwrap_or(rest)
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
