//! In-memory transport for orchestrator tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::clients::{HttpError, HttpResponseError};
use crate::hierarchy::batch::Batch;
use crate::hierarchy::submit::{AbortSignal, HierarchyTransport, SubmitOutcome};

#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, SubmitOutcome>,
    omitted: HashSet<String>,
    existing: HashSet<String>,
    fail_lookup: bool,
    abort_on_submit: Option<AbortSignal>,
    next_id: AtomicU64,
    batches: Mutex<Vec<Vec<String>>>,
    lookups: Mutex<Vec<Vec<String>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1000),
            ..Self::default()
        }
    }

    pub fn respond(mut self, external_id: &str, outcome: SubmitOutcome) -> Self {
        self.responses.insert(external_id.to_string(), outcome);
        self
    }

    pub fn omit(mut self, external_id: &str) -> Self {
        self.omitted.insert(external_id.to_string());
        self
    }

    pub fn existing(mut self, external_id: &str) -> Self {
        self.existing.insert(external_id.to_string());
        self
    }

    pub fn failing_lookup(mut self) -> Self {
        self.fail_lookup = true;
        self
    }

    /// Raises `signal` from inside every `submit` call.
    pub fn abort_on_submit(mut self, signal: AbortSignal) -> Self {
        self.abort_on_submit = Some(signal);
        self
    }

    pub fn submitted(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> Vec<Vec<String>> {
        self.lookups.lock().unwrap().clone()
    }
}

impl HierarchyTransport for FakeTransport {
    async fn submit(&self, batch: &Batch) -> Vec<(String, SubmitOutcome)> {
        let ids: Vec<String> = batch.external_ids().into_iter().map(String::from).collect();
        self.batches.lock().unwrap().push(ids.clone());
        if let Some(signal) = &self.abort_on_submit {
            signal.abort();
        }

        ids.into_iter()
            .filter(|xid| !self.omitted.contains(xid))
            .map(|xid| {
                let outcome = self.responses.get(&xid).cloned().unwrap_or_else(|| {
                    SubmitOutcome::Success {
                        id: self.next_id.fetch_add(1, Ordering::SeqCst),
                    }
                });
                (xid, outcome)
            })
            .collect()
    }

    async fn existing_external_ids(
        &self,
        external_ids: &[String],
    ) -> Result<HashSet<String>, HttpError> {
        self.lookups.lock().unwrap().push(external_ids.to_vec());
        if self.fail_lookup {
            return Err(HttpError::Response(HttpResponseError {
                code: 403,
                message: "Forbidden".to_string(),
                x_request_id: None,
                missing: vec![],
                duplicated: vec![],
            }));
        }
        Ok(external_ids
            .iter()
            .filter(|xid| self.existing.contains(*xid))
            .cloned()
            .collect())
    }
}
