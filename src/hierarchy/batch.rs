//! Dependency-ordered batching.

use crate::hierarchy::cycles::cycle_members;
use crate::hierarchy::errors::HierarchyError;
use crate::hierarchy::graph::HierarchyGraph;
use crate::hierarchy::node::AssetNode;
use crate::hierarchy::validate::ValidationReport;

/// A group of nodes whose parents are all written before the batch is sent.
///
/// Nodes carrying an internal id are updates, the rest are creates. Within
/// a batch there is no ordering dependency, so its requests may run
/// concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Position of the batch in the plan.
    pub index: usize,
    /// Distance from the roots of the input; all nodes in a batch share it.
    pub depth: usize,
    pub nodes: Vec<AssetNode>,
    /// Input position of each entry of `nodes`.
    pub positions: Vec<usize>,
}

impl Batch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the external ids in batch order.
    #[must_use]
    pub fn external_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(AssetNode::xid).collect()
    }

    /// Nodes to be created.
    pub fn creates(&self) -> impl Iterator<Item = &AssetNode> {
        self.nodes.iter().filter(|n| !n.is_update())
    }

    /// Nodes that already exist and are written with an update.
    pub fn updates(&self) -> impl Iterator<Item = &AssetNode> {
        self.nodes.iter().filter(|n| n.is_update())
    }
}

/// Orders the graph into batches of at most `max_batch_size` nodes.
///
/// Batches are built layer by layer: layer 0 holds every node without an
/// in-input parent, layer k+1 every child of a node in layer k. Each layer
/// is split into chunks, so a node's batch always comes after its parent's.
/// Inside a layer nodes keep their input order.
///
/// A `max_batch_size` of zero is treated as one.
///
/// # Errors
///
/// Returns [`HierarchyError::InvalidStructure`] listing the cycle members if
/// the graph is cyclic, since it has no topological order.
pub fn plan_batches(
    graph: &HierarchyGraph<'_>,
    max_batch_size: usize,
) -> Result<Vec<Batch>, HierarchyError> {
    let cycles = cycle_members(graph);
    if !cycles.is_empty() {
        let report = ValidationReport {
            cycles: cycles.into_iter().map(|i| graph.node(i).clone()).collect(),
            ..ValidationReport::default()
        };
        return Err(HierarchyError::InvalidStructure(report));
    }

    let max_batch_size = max_batch_size.max(1);
    let mut batches: Vec<Batch> = Vec::new();
    let mut frontier: Vec<usize> = graph.roots().to_vec();
    let mut depth = 0;

    while !frontier.is_empty() {
        for chunk in frontier.chunks(max_batch_size) {
            batches.push(Batch {
                index: batches.len(),
                depth,
                nodes: chunk.iter().map(|&i| graph.node(i).clone()).collect(),
                positions: chunk.to_vec(),
            });
        }

        let mut next: Vec<usize> = frontier
            .iter()
            .flat_map(|&i| graph.children(i).iter().copied())
            .collect();
        next.sort_unstable();
        frontier = next;
        depth += 1;
    }

    tracing::debug!(
        "Planned {} node(s) into {} batch(es) over {} layer(s)",
        graph.len(),
        batches.len(),
        depth
    );

    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(nodes: &[AssetNode], max: usize) -> Vec<Vec<String>> {
        let graph = HierarchyGraph::build(nodes);
        plan_batches(&graph, max)
            .unwrap()
            .iter()
            .map(|b| b.external_ids().into_iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_chain_gives_one_batch_per_level() {
        let nodes = vec![
            AssetNode::new("1", "root"),
            AssetNode::new("2", "child").with_parent("1"),
            AssetNode::new("3", "grandchild").with_parent("2"),
        ];
        assert_eq!(plan(&nodes, 1000), vec![vec!["1"], vec!["2"], vec!["3"]]);
    }

    #[test]
    fn test_input_order_is_kept_within_layer() {
        let nodes = vec![
            AssetNode::new("c2", "c2").with_parent("r2"),
            AssetNode::new("r1", "r1"),
            AssetNode::new("c1", "c1").with_parent("r1"),
            AssetNode::new("r2", "r2"),
        ];
        assert_eq!(plan(&nodes, 10), vec![vec!["r1", "r2"], vec!["c2", "c1"]]);
    }

    #[test]
    fn test_layers_are_chunked() {
        let mut nodes = vec![AssetNode::new("root", "root")];
        for i in 0..5 {
            nodes.push(AssetNode::new(format!("c{i}"), "c").with_parent("root"));
        }
        let graph = HierarchyGraph::build(&nodes);
        let batches = plan_batches(&graph, 2).unwrap();

        let sizes: Vec<usize> = batches.iter().map(Batch::len).collect();
        assert_eq!(sizes, vec![1, 2, 2, 1]);
        assert_eq!(
            batches.iter().map(|b| b.depth).collect::<Vec<_>>(),
            vec![0, 1, 1, 1]
        );
        assert_eq!(
            batches.iter().map(|b| b.index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_external_parents_start_in_first_layer() {
        let nodes = vec![
            AssetNode::new("a", "A").with_parent("existing"),
            AssetNode::new("b", "B").with_parent("a"),
            AssetNode::new("c", "C").with_parent_id(77),
        ];
        assert_eq!(plan(&nodes, 10), vec![vec!["a", "c"], vec!["b"]]);
    }

    #[test]
    fn test_creates_and_updates_are_split() {
        let nodes = vec![
            AssetNode::new("old", "Old").with_id(5),
            AssetNode::new("new", "New"),
        ];
        let graph = HierarchyGraph::build(&nodes);
        let batch = &plan_batches(&graph, 10).unwrap()[0];

        assert_eq!(batch.creates().map(AssetNode::xid).collect::<Vec<_>>(), vec!["new"]);
        assert_eq!(batch.updates().map(AssetNode::xid).collect::<Vec<_>>(), vec!["old"]);
    }

    #[test]
    fn test_cycle_is_refused() {
        let nodes = vec![
            AssetNode::new("a", "A").with_parent("b"),
            AssetNode::new("b", "B").with_parent("a"),
            AssetNode::new("ok", "Ok"),
        ];
        let graph = HierarchyGraph::build(&nodes);
        let Err(HierarchyError::InvalidStructure(report)) = plan_batches(&graph, 10) else {
            panic!("expected a structure error");
        };
        assert_eq!(report.cycles.len(), 2);
        assert!(report.orphans.is_empty());
    }

    #[test]
    fn test_empty_input_has_no_batches() {
        assert!(plan(&[], 10).is_empty());
    }

    #[test]
    fn test_zero_batch_size_is_treated_as_one() {
        let nodes = vec![AssetNode::new("a", "A"), AssetNode::new("b", "B")];
        assert_eq!(plan(&nodes, 0), vec![vec!["a"], vec!["b"]]);
    }
}
