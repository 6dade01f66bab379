//! Input nodes for hierarchy creation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One asset to be written as part of a hierarchy.
///
/// A node is identified by its `external_id`. Its parent is referenced either
/// by `parent_external_id` (which may point at another node in the same input
/// or at an asset that already exists) or by `parent_id` (always an existing
/// asset or an input node carrying that `id`). Leaving both unset makes the
/// node a root.
///
/// Setting `id` marks the node as an existing asset: it is written with an
/// update instead of a create.
///
/// The remaining fields are passed through to the API unchanged.
///
/// # Example
///
/// ```rust
/// use cognite_sdk::hierarchy::AssetNode;
///
/// let root = AssetNode::new("plant", "Plant");
/// let pump = AssetNode::new("pump-1", "Pump 1")
///     .with_parent("plant")
///     .with_description("Feed pump");
///
/// assert!(root.is_root());
/// assert_eq!(pump.parent_external_id.as_deref(), Some("plant"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetNode {
    /// Internal id of an asset that already exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Caller-assigned identifier, unique within the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Display name; required by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// External id of the parent asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_external_id: Option<String>,

    /// Internal id of the parent asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl AssetNode {
    /// Creates a root node with the given external id and name.
    #[must_use]
    pub fn new(external_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            external_id: Some(external_id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the parent by external id.
    #[must_use]
    pub fn with_parent(mut self, parent_external_id: impl Into<String>) -> Self {
        self.parent_external_id = Some(parent_external_id.into());
        self
    }

    /// Sets the parent by internal id.
    #[must_use]
    pub const fn with_parent_id(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Marks the node as an existing asset with the given internal id.
    #[must_use]
    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Returns the external id, or `""` when it is missing.
    #[must_use]
    pub fn xid(&self) -> &str {
        self.external_id.as_deref().unwrap_or_default()
    }

    /// Returns `true` if the node declares no parent at all.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_external_id.is_none() && self.parent_id.is_none()
    }

    /// Returns `true` if the node refers to an existing asset.
    #[must_use]
    pub const fn is_update(&self) -> bool {
        self.id.is_some()
    }
}
