//! Structural validation of a node collection.

use std::collections::BTreeSet;
use std::fmt;

use crate::hierarchy::cycles::detect_cycles;
use crate::hierarchy::graph::HierarchyGraph;
use crate::hierarchy::node::AssetNode;
use crate::identifier::is_valid_internal_id;

/// A category of structural problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueKind {
    /// Missing or empty external id or name, empty parent external id, or an
    /// internal id outside the accepted range.
    Invalid,
    /// Parent external id matches no input node and no known existing asset.
    Orphan,
    /// The parent cannot be determined unambiguously.
    UnsureParent,
    /// External id or internal id used by more than one input node.
    Duplicate,
    /// Member of a parent-pointer cycle.
    Cycle,
}

impl IssueKind {
    pub const ALL: [Self; 5] = [
        Self::Invalid,
        Self::Orphan,
        Self::UnsureParent,
        Self::Duplicate,
        Self::Cycle,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Orphan => "orphans",
            Self::UnsureParent => "unsure_parents",
            Self::Duplicate => "duplicates",
            Self::Cycle => "cycles",
        }
    }
}

/// Classification of every structural problem found in an input.
///
/// Each category lists the offending nodes in input order. A node may appear
/// in several categories, except that a node on a cycle is never reported as
/// an orphan or as having an unsure parent.
///
/// # Example
///
/// ```rust
/// use cognite_sdk::hierarchy::{validate, AssetNode, IssueKind};
///
/// let report = validate(&[AssetNode::new("A", "first"), AssetNode::new("A", "second")]);
///
/// assert!(!report.is_valid());
/// assert_eq!(report.external_ids(IssueKind::Duplicate).into_iter().collect::<Vec<_>>(), vec!["A"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub invalid: Vec<AssetNode>,
    pub orphans: Vec<AssetNode>,
    pub unsure_parents: Vec<AssetNode>,
    pub duplicates: Vec<AssetNode>,
    pub cycles: Vec<AssetNode>,
}

impl ValidationReport {
    /// Returns `true` if no category holds a node.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        IssueKind::ALL.iter().all(|&kind| self.nodes(kind).is_empty())
    }

    /// Returns the nodes reported under `kind`.
    #[must_use]
    pub fn nodes(&self, kind: IssueKind) -> &[AssetNode] {
        match kind {
            IssueKind::Invalid => &self.invalid,
            IssueKind::Orphan => &self.orphans,
            IssueKind::UnsureParent => &self.unsure_parents,
            IssueKind::Duplicate => &self.duplicates,
            IssueKind::Cycle => &self.cycles,
        }
    }

    /// Returns the distinct external ids reported under `kind`.
    ///
    /// Nodes without an external id are skipped.
    #[must_use]
    pub fn external_ids(&self, kind: IssueKind) -> BTreeSet<&str> {
        self.nodes(kind)
            .iter()
            .filter_map(|n| n.external_id.as_deref())
            .collect()
    }

    fn push(&mut self, kind: IssueKind, node: &AssetNode) {
        let bucket = match kind {
            IssueKind::Invalid => &mut self.invalid,
            IssueKind::Orphan => &mut self.orphans,
            IssueKind::UnsureParent => &mut self.unsure_parents,
            IssueKind::Duplicate => &mut self.duplicates,
            IssueKind::Cycle => &mut self.cycles,
        };
        bucket.push(node.clone());
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = IssueKind::ALL
            .iter()
            .map(|&kind| format!("{}: {}", kind.as_str(), self.nodes(kind).len()))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Validates `nodes`, treating every parent outside the input as unknown.
///
/// Any parent external id that matches no input node is reported as an
/// orphan. Use [`validate_with`] when some of those parents are known to
/// exist.
#[must_use]
pub fn validate(nodes: &[AssetNode]) -> ValidationReport {
    validate_with(nodes, |_| false)
}

/// Validates `nodes`; `is_existing` tells whether a parent external id that
/// is not part of the input belongs to an asset that already exists.
pub fn validate_with(nodes: &[AssetNode], is_existing: impl Fn(&str) -> bool) -> ValidationReport {
    validate_graph(&HierarchyGraph::build(nodes), is_existing)
}

/// Validates an already built graph.
pub fn validate_graph(
    graph: &HierarchyGraph<'_>,
    is_existing: impl Fn(&str) -> bool,
) -> ValidationReport {
    let in_cycle = detect_cycles(graph);
    let mut report = ValidationReport::default();

    for (i, node) in graph.nodes().iter().enumerate() {
        if is_malformed(node) {
            report.push(IssueKind::Invalid, node);
        }

        if in_cycle[i] {
            report.push(IssueKind::Cycle, node);
        } else {
            if graph
                .unresolved_parent(i)
                .is_some_and(|pxid| !is_existing(pxid))
            {
                report.push(IssueKind::Orphan, node);
            }
            if has_unsure_parent(graph, node) {
                report.push(IssueKind::UnsureParent, node);
            }
        }

        if graph.is_duplicate(node.xid())
            || node.id.is_some_and(|id| graph.is_duplicate_id(id))
        {
            report.push(IssueKind::Duplicate, node);
        }
    }

    report
}

/// Returns the distinct parent external ids that match no input node, in
/// first-seen order. These are the candidates for an existence lookup.
#[must_use]
pub fn unresolved_parent_external_ids(graph: &HierarchyGraph<'_>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    (0..graph.len())
        .filter_map(|i| graph.unresolved_parent(i))
        .filter(|pxid| seen.insert(*pxid))
        .map(String::from)
        .collect()
}

fn is_malformed(node: &AssetNode) -> bool {
    let blank = |s: &Option<String>| s.as_deref().map_or(true, |v| v.trim().is_empty());

    blank(&node.external_id)
        || blank(&node.name)
        || node.parent_external_id.as_deref() == Some("")
        || node.id.is_some_and(|id| !is_valid_internal_id(id))
        || node.parent_id.is_some_and(|id| !is_valid_internal_id(id))
}

fn has_unsure_parent(graph: &HierarchyGraph<'_>, node: &AssetNode) -> bool {
    if node.parent_id.is_some() && node.parent_external_id.is_some() {
        return true;
    }

    if node
        .parent_external_id
        .as_deref()
        .is_some_and(|pxid| graph.is_duplicate(pxid))
        || node.parent_id.is_some_and(|pid| graph.is_duplicate_id(pid))
    {
        return true;
    }

    let occurrences = graph.occurrences(node.xid());
    occurrences.len() > 1
        && occurrences.iter().any(|&other| {
            let other = graph.node(other);
            other.parent_external_id != node.parent_external_id || other.parent_id != node.parent_id
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(report: &ValidationReport, kind: IssueKind) -> Vec<&str> {
        report.external_ids(kind).into_iter().collect()
    }

    #[test]
    fn test_valid_hierarchy() {
        let nodes = vec![
            AssetNode::new("root", "Root"),
            AssetNode::new("child", "Child").with_parent("root"),
        ];
        let report = validate(&nodes);
        assert!(report.is_valid());
        assert_eq!(
            report.to_string(),
            "invalid: 0, orphans: 0, unsure_parents: 0, duplicates: 0, cycles: 0"
        );
    }

    #[test]
    fn test_missing_name_or_external_id_is_invalid() {
        let nodes = vec![
            AssetNode {
                external_id: Some("no-name".into()),
                ..AssetNode::default()
            },
            AssetNode {
                name: Some("No xid".into()),
                ..AssetNode::default()
            },
            AssetNode::new("blank", "  "),
        ];
        let report = validate(&nodes);
        assert_eq!(report.invalid.len(), 3);
        assert_eq!(ids(&report, IssueKind::Invalid), vec!["blank", "no-name"]);
    }

    #[test]
    fn test_out_of_range_ids_are_invalid() {
        let nodes = vec![
            AssetNode::new("zero", "Zero").with_id(0),
            AssetNode::new("big-parent", "Big").with_parent_id(u64::MAX),
        ];
        let report = validate(&nodes);
        assert_eq!(ids(&report, IssueKind::Invalid), vec!["big-parent", "zero"]);
    }

    #[test]
    fn test_unknown_parent_is_orphan_unless_confirmed() {
        let nodes = vec![
            AssetNode::new("a", "A").with_parent("existing"),
            AssetNode::new("b", "B").with_parent("missing"),
        ];

        let report = validate(&nodes);
        assert_eq!(ids(&report, IssueKind::Orphan), vec!["a", "b"]);

        let report = validate_with(&nodes, |pxid| pxid == "existing");
        assert_eq!(ids(&report, IssueKind::Orphan), vec!["b"]);
    }

    #[test]
    fn test_parent_id_is_never_orphan() {
        let nodes = vec![AssetNode::new("a", "A").with_parent_id(12)];
        assert!(validate(&nodes).is_valid());
    }

    #[test]
    fn test_both_parent_references_is_unsure() {
        let nodes = vec![AssetNode::new("a", "A")
            .with_parent("p")
            .with_parent_id(3)];
        let report = validate_with(&nodes, |_| true);
        assert_eq!(ids(&report, IssueKind::UnsureParent), vec!["a"]);
    }

    #[test]
    fn test_parent_pointing_at_duplicate_is_unsure() {
        let nodes = vec![
            AssetNode::new("p", "P one"),
            AssetNode::new("p", "P two"),
            AssetNode::new("c", "C").with_parent("p"),
        ];
        let report = validate(&nodes);
        assert_eq!(ids(&report, IssueKind::UnsureParent), vec!["c"]);
        assert_eq!(report.duplicates.len(), 2);
    }

    #[test]
    fn test_repeated_internal_id_is_duplicate() {
        let nodes = vec![
            AssetNode::new("x", "X").with_id(5),
            AssetNode::new("y", "Y").with_id(5),
            AssetNode::new("z", "Z").with_id(6),
        ];
        let report = validate(&nodes);
        assert!(!report.is_valid());
        assert_eq!(ids(&report, IssueKind::Duplicate), vec!["x", "y"]);
    }

    #[test]
    fn test_parent_id_pointing_at_duplicate_id_is_unsure() {
        let nodes = vec![
            AssetNode::new("x", "X").with_id(5),
            AssetNode::new("y", "Y").with_id(5),
            AssetNode::new("c", "C").with_parent_id(5),
            AssetNode::new("d", "D").with_parent_id(7),
        ];
        let report = validate(&nodes);
        assert_eq!(ids(&report, IssueKind::UnsureParent), vec!["c"]);
        assert_eq!(report.duplicates.len(), 2);
    }

    #[test]
    fn test_duplicates_with_differing_parents_are_unsure() {
        let nodes = vec![
            AssetNode::new("r1", "R1"),
            AssetNode::new("r2", "R2"),
            AssetNode::new("x", "X").with_parent("r1"),
            AssetNode::new("x", "X").with_parent("r2"),
        ];
        let report = validate(&nodes);
        assert_eq!(ids(&report, IssueKind::Duplicate), vec!["x"]);
        assert_eq!(report.unsure_parents.len(), 2);
    }

    #[test]
    fn test_cycle_suppresses_orphan_and_unsure() {
        let nodes = vec![
            AssetNode::new("a", "A").with_parent("b").with_parent_id(9),
            AssetNode::new("b", "B").with_parent("a"),
            AssetNode::new("lonely", "Lonely").with_parent("nowhere"),
        ];
        let report = validate(&nodes);
        assert_eq!(ids(&report, IssueKind::Cycle), vec!["a", "b"]);
        assert_eq!(ids(&report, IssueKind::Orphan), vec!["lonely"]);
        assert!(report.unsure_parents.is_empty());
    }

    #[test]
    fn test_duplicate_orphan_is_reported_in_both() {
        let nodes = vec![
            AssetNode::new("d", "D").with_parent("ghost"),
            AssetNode::new("d", "D").with_parent("ghost"),
        ];
        let report = validate(&nodes);
        assert_eq!(report.orphans.len(), 2);
        assert_eq!(report.duplicates.len(), 2);
        assert!(report.unsure_parents.is_empty());
    }

    #[test]
    fn test_unresolved_parent_external_ids_are_distinct() {
        let nodes = vec![
            AssetNode::new("a", "A").with_parent("x"),
            AssetNode::new("b", "B").with_parent("y"),
            AssetNode::new("c", "C").with_parent("x"),
            AssetNode::new("d", "D").with_parent("a"),
        ];
        let graph = HierarchyGraph::build(&nodes);
        assert_eq!(unresolved_parent_external_ids(&graph), vec!["x", "y"]);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let nodes = vec![
            AssetNode::new("a", "A").with_parent("b"),
            AssetNode::new("b", "B").with_parent("a"),
            AssetNode::new("a", "again"),
        ];
        assert_eq!(validate(&nodes), validate(&nodes));
    }
}
