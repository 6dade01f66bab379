//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use cognite_sdk::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// CDF reports errors as
/// `{"error": {"code": 409, "message": "...", "duplicated": [...], "missing": [...]}}`;
/// the item lists are kept so callers can tell which identifiers caused the
/// rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The error message reported by the API.
    pub message: String,
    /// The `x-request-id` header, for support requests.
    pub x_request_id: Option<String>,
    /// Identifiers the API could not find.
    pub missing: Vec<Value>,
    /// Identifiers that already exist.
    pub duplicated: Vec<Value>,
}

impl HttpResponseError {
    /// Builds an error from a response body, falling back to the raw body
    /// when it is not in the CDF error format.
    #[must_use]
    pub fn from_body(code: u16, body: &Value, x_request_id: Option<&str>) -> Self {
        let error = body.get("error");
        let message = match error {
            Some(Value::Object(obj)) => obj
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| Value::Object(obj.clone()).to_string(), String::from),
            Some(Value::String(s)) => s.clone(),
            _ => body
                .get("raw_body")
                .and_then(Value::as_str)
                .map_or_else(|| body.to_string(), String::from),
        };
        let list = |key: &str| {
            error
                .and_then(|e| e.get(key))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };

        Self {
            code,
            message,
            x_request_id: x_request_id.map(String::from),
            missing: list("missing"),
            duplicated: list("duplicated"),
        }
    }
}

impl fmt::Display for HttpResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | code: {}", self.message, self.code)?;
        if let Some(id) = &self.x_request_id {
            write!(f, " | X-Request-ID: {id}")?;
        }
        if !self.missing.is_empty() {
            write!(f, " | missing: {}", Value::Array(self.missing.clone()))?;
        }
        if !self.duplicated.is_empty() {
            write!(f, " | duplicated: {}", Value::Array(self.duplicated.clone()))?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpResponseError {}

/// Error returned when maximum retry attempts have been exhausted.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last error: {last}")]
pub struct MaxHttpRetriesExceededError {
    /// The number of tries that were attempted.
    pub tries: u32,
    /// The last error response.
    pub last: HttpResponseError,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if the API responded.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.last.code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidRequest(_) | Self::Decode(_) => None,
        }
    }

    /// Returns the `x-request-id` of the failing response, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Response(e) => e.x_request_id.as_deref(),
            Self::MaxRetries(e) => e.last.x_request_id.as_deref(),
            _ => None,
        }
    }
}
