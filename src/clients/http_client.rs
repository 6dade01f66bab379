//! HTTP client for CDF API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to a CDF project with automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::ClientConfig;

/// Fixed retry wait time in seconds, used when no `Retry-After` is given.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Status codes that are retried up to the request's `tries`.
const RETRYABLE_STATUS: [u16; 4] = [429, 502, 503, 504];

/// HTTP client bound to one CDF project.
///
/// The client handles:
/// - URL construction (`{base_url}/api/{version}/projects/{project}/{path}`)
/// - Default headers: bearer token, `x-cdp-app`, `x-cdp-sdk`
/// - Retry of 429/502/503/504 responses up to the request's `tries`
/// - Parsing CDF error bodies into [`HttpResponseError`]
///
/// # Example
///
/// ```rust,ignore
/// use cognite_sdk::clients::{HttpClient, HttpRequest};
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::post_items("assets/byids", &[json!({"externalId": "pump-1"})])
///     .build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    base_path: String,
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let base_uri = config.base_url().as_ref().to_string();
        let base_path = format!(
            "/api/{}/projects/{}",
            config.api_version(),
            urlencoding::encode(config.project().as_ref())
        );

        let mut default_headers = HashMap::new();
        default_headers.insert(
            "Authorization".to_string(),
            config.token().authorization_header(),
        );
        default_headers.insert(
            "x-cdp-app".to_string(),
            config.client_name().as_ref().to_string(),
        );
        default_headers.insert(
            "x-cdp-sdk".to_string(),
            format!("CogniteRustSdk:{SDK_VERSION}"),
        );
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_uri,
            base_path,
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the project base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request and returns the successful response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs, including timeouts (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Retryable responses persisted for every try (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!(
            "{}{}/{}",
            self.base_uri,
            self.base_path,
            request.path.trim_start_matches('/')
        );

        let mut headers = self.default_headers.clone();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        for (key, value) in &request.headers {
            headers.insert(key.clone(), value.clone());
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = self.client.post(&url).body(request.body.to_string());
            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();
            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };

            let response = HttpResponse::new(code, res_headers, body);
            if response.is_ok() {
                return Ok(response);
            }

            let error =
                HttpResponseError::from_body(code, &response.body, response.request_id());

            if !RETRYABLE_STATUS.contains(&code) {
                return Err(HttpError::Response(error));
            }

            if tries >= request.tries {
                if request.tries == 1 {
                    return Err(HttpError::Response(error));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    tries: request.tries,
                    last: error,
                }));
            }

            let delay = Self::calculate_retry_delay(&response);
            tracing::debug!(
                "Retrying POST {} after status {} (try {}/{}), waiting {:?}",
                request.path,
                code,
                tries,
                request.tries,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn calculate_retry_delay(response: &HttpResponse) -> Duration {
        response
            .retry_request_after
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map_or(Duration::from_secs(RETRY_WAIT_TIME), Duration::from_secs_f64)
    }
}
