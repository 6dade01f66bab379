//! # Cognite Data Fusion client
//!
//! A Rust client for the Cognite Data Fusion (CDF) REST API, built around
//! safe creation of asset hierarchies.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the project, token, client name and base URL
//! - An async HTTP client with bearer authentication and retry of throttled
//!   or unavailable responses
//! - [`hierarchy`]: validation, dependency-ordered batching and partial
//!   failure reconciliation for trees of assets
//!
//! ## Quick Start
//!
//! ```rust
//! use cognite_sdk::{ApiToken, ClientConfig, ClientName, CogniteClient, ProjectName};
//!
//! let config = ClientConfig::builder()
//!     .project(ProjectName::new("my-project").unwrap())
//!     .token(ApiToken::new("my-token").unwrap())
//!     .client_name(ClientName::new("asset-loader").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = CogniteClient::new(config).unwrap();
//! ```
//!
//! ## Validating a hierarchy
//!
//! Validation runs locally and never contacts the API:
//!
//! ```rust
//! use cognite_sdk::hierarchy::{validate, AssetNode, IssueKind};
//!
//! let nodes = vec![
//!     AssetNode::new("a", "A").with_parent("b"),
//!     AssetNode::new("b", "B").with_parent("a"),
//! ];
//! let report = validate(&nodes);
//!
//! assert!(!report.is_valid());
//! assert_eq!(report.nodes(IssueKind::Cycle).len(), 2);
//! ```
//!
//! ## Creating a hierarchy
//!
//! ```rust,ignore
//! use cognite_sdk::hierarchy::{AssetNode, HierarchyError, HierarchyOptions};
//!
//! let nodes = vec![
//!     AssetNode::new("plant", "Plant"),
//!     AssetNode::new("pump", "Pump").with_parent("plant"),
//! ];
//!
//! match client.assets().create_hierarchy(&nodes, &HierarchyOptions::new()).await {
//!     Ok(created) => println!("Created {} assets", created.len()),
//!     Err(HierarchyError::InvalidStructure(report)) => println!("Nothing sent: {report}"),
//!     Err(HierarchyError::PartialSubmission(outcome)) => {
//!         println!("Unknown: {:?}", outcome.unknown_external_ids());
//!         println!("Failed: {:?}", outcome.failed_external_ids());
//!     }
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Configuration and clients are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **No hidden retries**: Hierarchy submission classifies failures and
//!   reports them; only the HTTP layer retries, and only when configured to

pub mod assets;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod identifier;

// Re-export public types at crate root for convenience
pub use client::CogniteClient;
pub use config::{
    ApiToken, ApiVersion, BaseUrl, ClientConfig, ClientConfigBuilder, ClientName, ProjectName,
};
pub use error::ConfigError;
pub use identifier::{Identifier, MAX_VALID_INTERNAL_ID};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};

// Re-export hierarchy entry points
pub use hierarchy::{
    create_hierarchy, validate, AssetNode, CreatedAsset, HierarchyError, HierarchyOptions,
    OutcomeSet, ValidationReport,
};
