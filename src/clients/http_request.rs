//! HTTP request types.
//!
//! Every assets call this crate makes (create, update and by-id lookups) is a
//! `POST` with an `{"items": [...]}` body, so requests are always posts.

use serde::Serialize;
use serde_json::{json, Value};

use crate::clients::errors::InvalidHttpRequestError;

/// A `POST` relative to the project base path.
///
/// # Example
///
/// ```rust
/// use cognite_sdk::clients::HttpRequest;
/// use serde_json::json;
///
/// let request = HttpRequest::post_items("assets/byids", &[json!({"externalId": "pump-1"})])
///     .field("ignoreUnknownIds", true)
///     .tries(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.path, "assets/byids");
/// assert_eq!(request.body["ignoreUnknownIds"], json!(true));
/// assert_eq!(request.tries, 3);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// Path below `/api/{version}/projects/{project}/`.
    pub path: String,
    pub body: Value,
    /// Headers added on top of the client defaults.
    pub headers: Vec<(String, String)>,
    /// Number of attempts for retryable statuses; at least 1.
    pub tries: u32,
}

impl HttpRequest {
    #[must_use]
    pub fn post(path: impl Into<String>, body: impl Into<Value>) -> HttpRequestBuilder {
        HttpRequestBuilder {
            request: Self {
                path: path.into(),
                body: body.into(),
                headers: Vec::new(),
                tries: 1,
            },
        }
    }

    /// Starts a request whose body is `{"items": items}`.
    #[must_use]
    pub fn post_items<T: Serialize>(path: impl Into<String>, items: &[T]) -> HttpRequestBuilder {
        Self::post(path, json!({ "items": items }))
    }

    /// Checks the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::EmptyPath`] if the path has no
    /// segment.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }
        Ok(())
    }
}

/// Builder returned by the [`HttpRequest`] constructors.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    /// Sets a top-level field of an object body, next to `items`.
    ///
    /// Has no effect when the body is not a JSON object.
    #[must_use]
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Some(object) = self.request.body.as_object_mut() {
            object.insert(key.to_string(), value.into());
        }
        self
    }

    /// Adds a header, overriding a client default of the same name.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((key.into(), value.into()));
        self
    }

    /// Sets the number of attempts; 0 is treated as 1.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.request.tries = if tries == 0 { 1 } else { tries };
        self
    }

    /// Finishes the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if [`HttpRequest::verify`] fails.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_items_wraps_body() {
        let request = HttpRequest::post_items("assets/byids", &[json!({"externalId": "a"})])
            .build()
            .unwrap();

        assert_eq!(request.body, json!({"items": [{"externalId": "a"}]}));
        assert_eq!(request.tries, 1);
    }

    #[test]
    fn test_field_sits_next_to_items() {
        let request = HttpRequest::post_items("assets/byids", &[json!({"id": 1})])
            .field("ignoreUnknownIds", true)
            .build()
            .unwrap();

        assert_eq!(
            request.body,
            json!({"items": [{"id": 1}], "ignoreUnknownIds": true})
        );
    }

    #[test]
    fn test_field_on_non_object_body_is_ignored() {
        let request = HttpRequest::post("assets", json!([1, 2]))
            .field("ignored", 1)
            .build()
            .unwrap();

        assert_eq!(request.body, json!([1, 2]));
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let result = HttpRequest::post("/", json!({})).build();
        assert_eq!(result.unwrap_err(), InvalidHttpRequestError::EmptyPath);
    }

    #[test]
    fn test_headers_and_tries_floor() {
        let request = HttpRequest::post("assets", json!({"items": []}))
            .header("x-cdp-app", "override")
            .tries(0)
            .build()
            .unwrap();

        assert_eq!(
            request.headers,
            vec![("x-cdp-app".to_string(), "override".to_string())]
        );
        assert_eq!(request.tries, 1);
    }
}
