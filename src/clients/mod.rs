//! HTTP client types for CDF API communication.
//!
//! This module provides the HTTP layer used by the resource APIs. It handles
//! request validation, URL and header construction, retries, and parsing of
//! CDF error bodies.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client bound to one project
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpError`]: The unified error type
//!
//! # Retry Behavior
//!
//! - **429, 502, 503, 504**: Retried using the `Retry-After` header value, or
//!   1 second if not present, up to the request's `tries`
//! - **Other errors**: Returned immediately
//!
//! The default `tries` is 1, meaning no automatic retries.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
