//! Assets: the resource type hierarchies are built from.
//!
//! - [`Asset`]: an asset as returned by the API
//! - [`AssetsApi`]: create, update and retrieve assets, and write whole
//!   hierarchies through [`AssetsApi::create_hierarchy`]
//!
//! # Example
//!
//! ```rust,ignore
//! use cognite_sdk::hierarchy::{AssetNode, HierarchyOptions};
//!
//! let nodes = vec![
//!     AssetNode::new("plant", "Plant"),
//!     AssetNode::new("pump", "Pump").with_parent("plant"),
//! ];
//! let created = client
//!     .assets()
//!     .create_hierarchy(&nodes, &HierarchyOptions::new())
//!     .await?;
//! ```

mod api;
mod asset;

pub use api::{classify_error, AssetsApi};
pub use asset::Asset;
