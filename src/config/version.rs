//! CDF API version definitions.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// CDF API version used in request paths (`/api/{version}/projects/...`).
///
/// # Example
///
/// ```rust
/// use cognite_sdk::ApiVersion;
///
/// let version: ApiVersion = "playground".parse().unwrap();
/// assert_eq!(version, ApiVersion::Playground);
/// assert_eq!(ApiVersion::default().to_string(), "v1");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// The stable API.
    #[default]
    V1,
    /// Endpoints that are not yet generally available.
    Playground,
}

impl ApiVersion {
    /// Returns the path segment for this version.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::Playground => "playground",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" => Ok(Self::V1),
            "playground" => Ok(Self::Playground),
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}
