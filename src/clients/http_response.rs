//! HTTP response types.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// An HTTP response from the CDF API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: Value,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing `Retry-After` if present.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `x-request-id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Deserializes the `items` array of the body.
    ///
    /// A body without `items` yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if an item does not match `T`.
    pub fn items<T: DeserializeOwned>(&self) -> Result<Vec<T>, serde_json::Error> {
        match self.body.get("items") {
            Some(items) => serde_json::from_value(items.clone()),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(response.is_ok(), "Expected is_ok() for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 409, 429, 500, 503] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(!response.is_ok());
        }
    }

    #[test]
    fn test_retry_after_and_request_id_headers() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["2.5".to_string()]);
        headers.insert("x-request-id".to_string(), vec!["req-42".to_string()]);

        let response = HttpResponse::new(429, headers, json!({}));
        assert_eq!(response.retry_request_after, Some(2.5));
        assert_eq!(response.request_id(), Some("req-42"));
    }

    #[test]
    fn test_items_and_cursor() {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Item {
            external_id: String,
        }

        let response = HttpResponse::new(
            200,
            HashMap::new(),
            json!({"items": [{"externalId": "a"}, {"externalId": "b"}]}),
        );
        let items: Vec<Item> = response.items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].external_id, "b");

        let empty = HttpResponse::new(200, HashMap::new(), json!({}));
        assert!(empty.items::<Item>().unwrap().is_empty());
    }
}
