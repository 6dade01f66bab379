//! Asset hierarchy validation, ordering and submission.
//!
//! Creating a tree of assets in one call needs three things the API does not
//! do for you:
//!
//! - **Validation**: orphans, cycles, duplicate external ids, ambiguous
//!   parents and malformed nodes are found before anything is sent
//!   ([`validate`]).
//! - **Ordering**: nodes are grouped into batches so that every parent is
//!   written before its children ([`plan_batches`]).
//! - **Reconciliation**: a node whose parent was not created is never sent,
//!   and the final state of every node is reported as created, unknown or
//!   failed ([`OutcomeSet`]).
//!
//! [`create_hierarchy`] runs all three against any [`HierarchyTransport`];
//! [`AssetsApi`](crate::assets::AssetsApi) is the HTTP implementation.
//!
//! # Example
//!
//! ```rust
//! use cognite_sdk::hierarchy::{plan_batches, validate, AssetNode, HierarchyGraph};
//!
//! let nodes = vec![
//!     AssetNode::new("plant", "Plant"),
//!     AssetNode::new("pump", "Pump").with_parent("plant"),
//! ];
//!
//! assert!(validate(&nodes).is_valid());
//!
//! let graph = HierarchyGraph::build(&nodes);
//! let batches = plan_batches(&graph, 1000).unwrap();
//! assert_eq!(batches.len(), 2);
//! ```

mod batch;
mod cycles;
mod errors;
mod graph;
mod node;
mod outcome;
mod submit;
mod validate;

#[cfg(test)]
mod test_transport;

pub use batch::{plan_batches, Batch};
pub use cycles::{cycle_members, detect_cycles};
pub use errors::HierarchyError;
pub use graph::HierarchyGraph;
pub use node::AssetNode;
pub use outcome::{CreatedAsset, OutcomeSet};
pub use submit::{
    AbortSignal, FailurePolicy, HierarchyOptions, HierarchyTransport, HierarchyUploader,
    SubmitOutcome, DEFAULT_BATCH_SIZE,
};
pub use validate::{
    unresolved_parent_external_ids, validate, validate_graph, validate_with, IssueKind,
    ValidationReport,
};

use std::collections::HashSet;

/// Validates `nodes`, writes them in dependency order and reports the result.
///
/// Parents referenced by external id that are not part of the input are
/// looked up on the platform first, unless
/// [`HierarchyOptions::assume_external_parents_exist`] is set. Nodes carrying
/// an `id` are updated, the rest created.
///
/// # Errors
///
/// - [`HierarchyError::InvalidStructure`] if validation fails. Nothing is
///   written. An input with a cycle is refused without contacting the
///   platform, so every parent outside the input is reported as an orphan.
/// - [`HierarchyError::ExistenceCheck`] if the parent lookup fails.
/// - [`HierarchyError::PartialSubmission`] if any node was not created.
pub async fn create_hierarchy<T: HierarchyTransport>(
    transport: &T,
    nodes: &[AssetNode],
    options: &HierarchyOptions,
) -> Result<Vec<CreatedAsset>, HierarchyError> {
    let graph = HierarchyGraph::build(nodes);

    if detect_cycles(&graph).contains(&true) {
        return Err(HierarchyError::InvalidStructure(validate_graph(
            &graph,
            |_| false,
        )));
    }

    let report = if options.assume_external_parents_exist {
        validate_graph(&graph, |_| true)
    } else {
        let external_parents = unresolved_parent_external_ids(&graph);
        let existing: HashSet<String> = if external_parents.is_empty() {
            HashSet::new()
        } else {
            tracing::debug!(
                "Looking up {} parent external id(s) outside the input",
                external_parents.len()
            );
            transport
                .existing_external_ids(&external_parents)
                .await
                .map_err(HierarchyError::ExistenceCheck)?
        };
        validate_graph(&graph, |pxid| existing.contains(pxid))
    };
    if !report.is_valid() {
        return Err(HierarchyError::InvalidStructure(report));
    }

    let batch_size = options
        .batch_size
        .unwrap_or_else(|| transport.preferred_batch_size());
    let batches = plan_batches(&graph, batch_size)?;
    tracing::info!(
        "Creating asset hierarchy of {} node(s) in {} batch(es)",
        graph.len(),
        batches.len()
    );

    let outcome = HierarchyUploader::new(transport, options)
        .run(&graph, &batches)
        .await;

    if outcome.is_complete() {
        Ok(outcome.created)
    } else {
        Err(HierarchyError::PartialSubmission(outcome))
    }
}
