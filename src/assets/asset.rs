//! Asset response model and update payloads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::hierarchy::AssetNode;

/// An asset as returned by the API.
///
/// # Example
///
/// ```rust
/// use cognite_sdk::assets::Asset;
///
/// let asset: Asset = serde_json::from_str(
///     r#"{"id": 7, "externalId": "pump", "name": "Pump", "rootId": 1, "createdTime": 1700000000000}"#,
/// ).unwrap();
///
/// assert_eq!(asset.external_id.as_deref(), Some("pump"));
/// assert!(asset.created_time.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_external_id: Option<String>,

    /// Id of the top of the tree this asset belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_set_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<DateTime<Utc>>,

    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated_time: Option<DateTime<Utc>>,
}

/// Builds the `assets/update` item for a node that carries an `id`.
///
/// Every field set on the node is written with `set` semantics; unset
/// fields are left untouched on the platform.
pub(crate) fn update_item(node: &AssetNode, id: u64) -> Value {
    let mut update = Map::new();
    let mut set = |field: &str, value: Value| {
        update.insert(field.to_string(), json!({ "set": value }));
    };

    if let Some(xid) = &node.external_id {
        set("externalId", json!(xid));
    }
    if let Some(name) = &node.name {
        set("name", json!(name));
    }
    if let Some(description) = &node.description {
        set("description", json!(description));
    }
    if let Some(source) = &node.source {
        set("source", json!(source));
    }
    if let Some(data_set_id) = node.data_set_id {
        set("dataSetId", json!(data_set_id));
    }
    if let Some(metadata) = &node.metadata {
        set("metadata", json!(metadata));
    }
    if let Some(parent) = node.parent_external_id.as_deref().filter(|p| !p.is_empty()) {
        set("parentExternalId", json!(parent));
    } else if let Some(parent_id) = node.parent_id {
        set("parentId", json!(parent_id));
    }

    json!({ "id": id, "update": update })
}
