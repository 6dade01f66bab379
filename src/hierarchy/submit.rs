//! Batch submission and failure propagation.
//!
//! The [`HierarchyUploader`] walks a batch plan in order, hands each batch to
//! a [`HierarchyTransport`] and records one disposition per node. A node is
//! only sent once its parent is known to be created; otherwise it is skipped
//! and inherits its parent's state (`failed` below a rejected parent,
//! `unknown` below an ambiguous one).

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::clients::HttpError;
use crate::hierarchy::batch::Batch;
use crate::hierarchy::graph::HierarchyGraph;
use crate::hierarchy::outcome::{CreatedAsset, OutcomeSet};

/// Batch cap used when neither the options nor the transport choose one.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// What happened to one item of a submitted batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The asset was written and has this internal id.
    Success { id: u64 },
    /// The API rejected the item; it was not written.
    ClientError { code: u16, reason: String },
    /// The API failed; the item may or may not have been written.
    ServerError { code: u16, reason: String },
    /// No reply arrived in time; the item may or may not have been written.
    Timeout,
    /// The request was sent but its reply was lost or unreadable.
    Interrupted { reason: String },
    /// The request never left the client.
    NotSent { reason: String },
}

impl SubmitOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns `true` if the item's state on the platform is unknown.
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            Self::ServerError { .. } | Self::Timeout | Self::Interrupted { .. }
        )
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { id } => write!(f, "created with id {id}"),
            Self::ClientError { code, reason } => write!(f, "rejected ({code}): {reason}"),
            Self::ServerError { code, reason } => write!(f, "server error ({code}): {reason}"),
            Self::Timeout => f.write_str("timed out"),
            Self::Interrupted { reason } => write!(f, "interrupted: {reason}"),
            Self::NotSent { reason } => write!(f, "not sent: {reason}"),
        }
    }
}

/// The write side used by hierarchy creation.
///
/// Implementations must not retry on their own behalf beyond what their
/// HTTP layer does, and must report every item of a batch; items left out of
/// the reply are treated as ambiguous.
#[allow(async_fn_in_trait)]
pub trait HierarchyTransport {
    /// Writes the nodes of `batch` and returns an outcome per external id.
    async fn submit(&self, batch: &Batch) -> Vec<(String, SubmitOutcome)>;

    /// Returns the subset of `external_ids` that exist on the platform.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] if the lookup itself fails.
    async fn existing_external_ids(
        &self,
        external_ids: &[String],
    ) -> Result<HashSet<String>, HttpError>;

    /// Batch cap used when [`HierarchyOptions::batch_size`] is not set.
    fn preferred_batch_size(&self) -> usize {
        DEFAULT_BATCH_SIZE
    }
}

/// What to do with later batches once a batch had failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep going; only descendants of failed nodes are skipped.
    #[default]
    ContinueIndependentSubtrees,
    /// Do not start another batch after one had a failed or ambiguous item.
    StopAfterFailedBatch,
}

/// Shared flag asking a running submission to stop before its next batch.
///
/// The batch in flight when the flag is raised is completed.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-call options for `create_hierarchy`.
#[derive(Debug, Clone, Default)]
pub struct HierarchyOptions {
    /// Maximum nodes per batch. Defaults to the transport's preference.
    pub batch_size: Option<usize>,
    /// Skip the existence lookup and treat every parent outside the input as
    /// an existing asset.
    pub assume_external_parents_exist: bool,
    pub failure_policy: FailurePolicy,
    pub abort: Option<AbortSignal>,
}

impl HierarchyOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    #[must_use]
    pub const fn assume_external_parents_exist(mut self, assume: bool) -> Self {
        self.assume_external_parents_exist = assume;
        self
    }

    #[must_use]
    pub const fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[must_use]
    pub fn abort_signal(mut self, signal: AbortSignal) -> Self {
        self.abort = Some(signal);
        self
    }

    fn is_aborted(&self) -> bool {
        self.abort.as_ref().is_some_and(AbortSignal::is_aborted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Pending,
    Created(u64),
    Ambiguous,
    Rejected,
    Skipped { below_ambiguous: bool },
}

impl Disposition {
    const fn is_uncertain(self) -> bool {
        matches!(self, Self::Ambiguous | Self::Skipped { below_ambiguous: true })
    }
}

/// Write-once record of what happened to each input position.
struct DispositionTable {
    states: Vec<Disposition>,
}

impl DispositionTable {
    fn new(len: usize) -> Self {
        Self {
            states: vec![Disposition::Pending; len],
        }
    }

    fn get(&self, pos: usize) -> Disposition {
        self.states[pos]
    }

    fn record(&mut self, pos: usize, disposition: Disposition) -> bool {
        if self.states[pos] == Disposition::Pending {
            self.states[pos] = disposition;
            true
        } else {
            false
        }
    }

    /// Marks a node as skipped, inheriting uncertainty from its parent.
    fn skip(&mut self, graph: &HierarchyGraph<'_>, pos: usize) {
        let below_ambiguous = graph
            .parent(pos)
            .is_some_and(|p| self.states[p].is_uncertain());
        self.record(pos, Disposition::Skipped { below_ambiguous });
    }
}

#[derive(Debug, Default)]
struct BatchTally {
    created: usize,
    ambiguous: usize,
    rejected: usize,
    missing: usize,
}

impl BatchTally {
    const fn has_failures(&self) -> bool {
        self.ambiguous + self.rejected + self.missing > 0
    }
}

/// Runs a batch plan against a transport.
pub struct HierarchyUploader<'t, T> {
    transport: &'t T,
    options: &'t HierarchyOptions,
}

impl<'t, T: HierarchyTransport> HierarchyUploader<'t, T> {
    #[must_use]
    pub const fn new(transport: &'t T, options: &'t HierarchyOptions) -> Self {
        Self { transport, options }
    }

    /// Submits `batches` in order and returns the final state of every node
    /// in `graph`.
    ///
    /// `batches` must come from [`plan_batches`](super::plan_batches) over the
    /// same graph. Nodes that appear in no batch are reported as failed.
    pub async fn run(&self, graph: &HierarchyGraph<'_>, batches: &[Batch]) -> OutcomeSet {
        let mut table = DispositionTable::new(graph.len());
        let mut stopped = false;
        let mut had_failures = false;

        for batch in batches {
            if !stopped {
                if self.options.is_aborted() {
                    tracing::warn!("Abort requested; not starting batch {}", batch.index);
                    stopped = true;
                } else if had_failures
                    && self.options.failure_policy == FailurePolicy::StopAfterFailedBatch
                {
                    tracing::warn!(
                        "Stopping before batch {} after an earlier batch had failures",
                        batch.index
                    );
                    stopped = true;
                }
            }

            if stopped {
                for &pos in &batch.positions {
                    table.skip(graph, pos);
                }
                continue;
            }

            let ready = Self::ready_subset(graph, &mut table, batch);
            if ready.is_empty() {
                continue;
            }

            tracing::debug!(
                "Submitting batch {} at depth {} with {} node(s)",
                ready.index,
                ready.depth,
                ready.len()
            );
            let reply = self.transport.submit(&ready).await;
            let tally = Self::apply_reply(&mut table, &ready, reply);

            if tally.has_failures() {
                had_failures = true;
                tracing::warn!(
                    "Batch {}: {} created, {} rejected, {} ambiguous, {} missing from reply",
                    ready.index,
                    tally.created,
                    tally.rejected,
                    tally.ambiguous,
                    tally.missing
                );
            } else {
                tracing::debug!("Batch {}: {} created", ready.index, tally.created);
            }
        }

        let outcome = Self::collect(graph, &table);
        tracing::info!("Hierarchy submission finished: {outcome}");
        outcome
    }

    /// Returns the part of `batch` whose parents were created, marking the
    /// rest as skipped.
    fn ready_subset(
        graph: &HierarchyGraph<'_>,
        table: &mut DispositionTable,
        batch: &Batch,
    ) -> Batch {
        let mut ready = Batch {
            index: batch.index,
            depth: batch.depth,
            nodes: Vec::with_capacity(batch.len()),
            positions: Vec::with_capacity(batch.len()),
        };

        for (node, &pos) in batch.nodes.iter().zip(&batch.positions) {
            match graph.parent(pos).map(|p| table.get(p)) {
                None | Some(Disposition::Created(_)) => {
                    ready.nodes.push(node.clone());
                    ready.positions.push(pos);
                }
                Some(_) => table.skip(graph, pos),
            }
        }

        let skipped = batch.len() - ready.len();
        if skipped > 0 {
            tracing::warn!(
                "Batch {}: skipping {} node(s) whose parent was not created",
                batch.index,
                skipped
            );
        }
        ready
    }

    fn apply_reply(
        table: &mut DispositionTable,
        batch: &Batch,
        reply: Vec<(String, SubmitOutcome)>,
    ) -> BatchTally {
        let lookup: HashMap<&str, usize> = batch
            .nodes
            .iter()
            .zip(&batch.positions)
            .map(|(node, &pos)| (node.xid(), pos))
            .collect();
        let mut tally = BatchTally::default();

        for (external_id, outcome) in reply {
            let Some(&pos) = lookup.get(external_id.as_str()) else {
                tracing::warn!("Ignoring outcome for '{external_id}', which was not in the batch");
                continue;
            };
            let disposition = match outcome {
                SubmitOutcome::Success { id } => Disposition::Created(id),
                ref other if other.is_ambiguous() => Disposition::Ambiguous,
                _ => Disposition::Rejected,
            };
            if !table.record(pos, disposition) {
                tracing::warn!("Ignoring repeated outcome for '{external_id}'");
                continue;
            }
            match disposition {
                Disposition::Created(_) => tally.created += 1,
                Disposition::Ambiguous => {
                    tracing::debug!("'{external_id}': {outcome}");
                    tally.ambiguous += 1;
                }
                _ => {
                    tracing::debug!("'{external_id}': {outcome}");
                    tally.rejected += 1;
                }
            }
        }

        for &pos in &batch.positions {
            if table.record(pos, Disposition::Ambiguous) {
                tally.missing += 1;
            }
        }
        if tally.missing > 0 {
            tracing::warn!(
                "Batch {}: transport reported no outcome for {} node(s)",
                batch.index,
                tally.missing
            );
        }

        tally
    }

    fn collect(graph: &HierarchyGraph<'_>, table: &DispositionTable) -> OutcomeSet {
        let mut outcome = OutcomeSet::default();
        for (pos, node) in graph.nodes().iter().enumerate() {
            match table.get(pos) {
                Disposition::Created(id) => outcome.created.push(CreatedAsset {
                    external_id: node.xid().to_string(),
                    id,
                }),
                state if state.is_uncertain() => outcome.unknown.push(node.clone()),
                _ => outcome.failed.push(node.clone()),
            }
        }
        outcome
    }
}
