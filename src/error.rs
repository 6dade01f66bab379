//! Error types for client configuration.
//!
//! This module contains the error type used when building a
//! [`ClientConfig`](crate::ClientConfig) or one of its validated newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use cognite_sdk::{ProjectName, ConfigError};
//!
//! let result = ProjectName::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyProject)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Project name cannot be empty.
    #[error("Project name cannot be empty. Please provide the CDF project to connect to.")]
    EmptyProject,

    /// API token cannot be empty.
    #[error("API token cannot be empty. Please provide a valid bearer token.")]
    EmptyApiToken,

    /// Client name cannot be empty.
    #[error("Client name cannot be empty. Please provide a name identifying your application.")]
    EmptyClientName,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.cognitedata.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected 'v1' or 'playground'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Worker count is out of range.
    #[error("Number of workers should be >= 1, was {value}")]
    InvalidMaxWorkers {
        /// The rejected worker count.
        value: usize,
    },

    /// An item limit is out of range.
    #[error("Invalid {field} {value}. Must satisfy 1 <= {field} <= {max}.")]
    InvalidLimit {
        /// The name of the limit.
        field: &'static str,
        /// The rejected value.
        value: usize,
        /// The largest accepted value.
        max: usize,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
