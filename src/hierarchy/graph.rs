//! In-memory parent/child graph over an input node collection.

use std::collections::HashMap;

use crate::hierarchy::node::AssetNode;

/// Parent/child structure derived from a slice of [`AssetNode`]s.
///
/// Nodes are addressed by their position in the input slice. When an
/// external id or internal id occurs more than once, every occurrence is kept
/// as a node but references to it resolve to the **last** occurrence.
///
/// A node whose parent is not part of the input is a root of the graph; it is
/// assumed to hang under an asset that already exists.
#[derive(Debug)]
pub struct HierarchyGraph<'a> {
    nodes: &'a [AssetNode],
    by_external_id: HashMap<&'a str, usize>,
    occurrences: HashMap<&'a str, Vec<usize>>,
    by_id: HashMap<u64, usize>,
    id_counts: HashMap<u64, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a> HierarchyGraph<'a> {
    /// Builds the graph. Never fails: structural problems are left for the
    /// validator to report.
    #[must_use]
    pub fn build(nodes: &'a [AssetNode]) -> Self {
        let mut by_external_id = HashMap::with_capacity(nodes.len());
        let mut occurrences: HashMap<&str, Vec<usize>> = HashMap::with_capacity(nodes.len());
        let mut by_id = HashMap::new();
        let mut id_counts: HashMap<u64, usize> = HashMap::new();

        for (i, node) in nodes.iter().enumerate() {
            if let Some(xid) = node.external_id.as_deref().filter(|x| !x.is_empty()) {
                by_external_id.insert(xid, i);
                occurrences.entry(xid).or_default().push(i);
            }
            if let Some(id) = node.id {
                by_id.insert(id, i);
                *id_counts.entry(id).or_default() += 1;
            }
        }

        let mut parents = Vec::with_capacity(nodes.len());
        let mut children = vec![Vec::new(); nodes.len()];
        let mut roots = Vec::new();

        for (i, node) in nodes.iter().enumerate() {
            let parent = match (node.parent_external_id.as_deref(), node.parent_id) {
                (Some(pxid), _) if !pxid.is_empty() => by_external_id.get(pxid).copied(),
                (_, Some(pid)) => by_id.get(&pid).copied(),
                _ => None,
            };
            match parent {
                Some(p) => children[p].push(i),
                None => roots.push(i),
            }
            parents.push(parent);
        }

        Self {
            nodes,
            by_external_id,
            occurrences,
            by_id,
            id_counts,
            parents,
            children,
            roots,
        }
    }

    /// Returns the number of nodes, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the input slice the graph was built from.
    #[must_use]
    pub const fn nodes(&self) -> &'a [AssetNode] {
        self.nodes
    }

    #[must_use]
    pub fn node(&self, index: usize) -> &'a AssetNode {
        &self.nodes[index]
    }

    /// Returns the in-input parent of a node.
    #[must_use]
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.parents[index]
    }

    /// Returns the in-input children of a node, in input order.
    #[must_use]
    pub fn children(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    /// Returns the nodes without an in-input parent, in input order.
    #[must_use]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Returns every input position holding `external_id`.
    #[must_use]
    pub fn occurrences(&self, external_id: &str) -> &[usize] {
        self.occurrences
            .get(external_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` if `external_id` occurs more than once in the input.
    #[must_use]
    pub fn is_duplicate(&self, external_id: &str) -> bool {
        self.occurrences(external_id).len() > 1
    }

    /// Returns `true` if internal id `id` is carried by more than one input
    /// node.
    #[must_use]
    pub fn is_duplicate_id(&self, id: u64) -> bool {
        self.id_counts.get(&id).is_some_and(|&count| count > 1)
    }

    /// Returns the parent external id of a node when it does not resolve to
    /// any input node.
    #[must_use]
    pub fn unresolved_parent(&self, index: usize) -> Option<&'a str> {
        let pxid = self.nodes[index]
            .parent_external_id
            .as_deref()
            .filter(|p| !p.is_empty())?;
        if self.by_external_id.contains_key(pxid) {
            None
        } else {
            Some(pxid)
        }
    }
}
