//! Result of a hierarchy submission.

use std::fmt;

use crate::hierarchy::node::AssetNode;

/// An asset that was written successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAsset {
    pub external_id: String,
    /// Internal id assigned (or confirmed) by the platform.
    pub id: u64,
}

/// Final state of every node submitted through `create_hierarchy`.
///
/// The three lists are disjoint and together cover each input node exactly
/// once. They keep input order.
///
/// - `created`: written and acknowledged.
/// - `unknown`: the request may or may not have taken effect (server error,
///   timeout, missing from the reply), or the node was skipped below such an
///   ancestor.
/// - `failed`: definitely not written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeSet {
    pub created: Vec<CreatedAsset>,
    pub unknown: Vec<AssetNode>,
    pub failed: Vec<AssetNode>,
}

impl OutcomeSet {
    /// Returns `true` if every node was created.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unknown.is_empty() && self.failed.is_empty()
    }

    /// Returns the number of nodes accounted for.
    #[must_use]
    pub fn len(&self) -> usize {
        self.created.len() + self.unknown.len() + self.failed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn created_external_ids(&self) -> Vec<&str> {
        self.created.iter().map(|c| c.external_id.as_str()).collect()
    }

    #[must_use]
    pub fn unknown_external_ids(&self) -> Vec<&str> {
        self.unknown.iter().map(AssetNode::xid).collect()
    }

    #[must_use]
    pub fn failed_external_ids(&self) -> Vec<&str> {
        self.failed.iter().map(AssetNode::xid).collect()
    }
}

impl fmt::Display for OutcomeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "created: {}, unknown: {}, failed: {}",
            self.created.len(),
            self.unknown.len(),
            self.failed.len()
        )
    }
}
