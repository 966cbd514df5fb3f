//! Ordered queue of replace requests.
//!
//! Requests are queued by the editor (or loaded from a plan file) and
//! executed in submission order. Each request is its own batch with its own
//! signal; a failed request never stops the ones after it.

use crate::hooks::RenderSurface;
use crate::report::{BatchReport, ReplaceError};
use crate::request::ReplaceRequest;
use worldforge_core::region::Region;

/// Outcome of one executed request.
pub type BatchOutcome = Result<BatchReport, ReplaceError>;

/// A queue of requests waiting to be executed.
///
/// Supports optional history tracking of executed requests and their
/// outcomes.
#[derive(Debug, Default)]
pub struct ReplaceQueue {
    pending: Vec<ReplaceRequest>,
    history: Vec<(ReplaceRequest, BatchOutcome)>,
    /// Maximum history entries to retain. 0 = no history.
    max_history: usize,
}

impl ReplaceQueue {
    /// Create an empty queue with no history tracking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue that retains up to `max_history` entries.
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            max_history,
            ..Self::default()
        }
    }

    pub fn push(&mut self, request: impl Into<ReplaceRequest>) {
        self.pending.push(request.into());
    }

    pub fn push_batch(&mut self, requests: impl IntoIterator<Item = ReplaceRequest>) {
        self.pending.extend(requests);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Execute every pending request in order. Returns one outcome per
    /// request.
    pub fn execute_all<S: RenderSurface + ?Sized>(
        &mut self,
        region: &mut Region,
        surface: &mut S,
    ) -> Vec<BatchOutcome> {
        let requests: Vec<ReplaceRequest> = self.pending.drain(..).collect();
        let mut outcomes = Vec::with_capacity(requests.len());

        for request in requests {
            let outcome = request.execute(region, surface);
            if self.max_history > 0 {
                self.history.push((request, outcome.clone()));
            }
            outcomes.push(outcome);
        }

        let excess = self.history.len().saturating_sub(self.max_history);
        if excess > 0 {
            self.history.drain(..excess);
        }

        outcomes
    }

    /// Executed requests with their outcomes, oldest first.
    pub fn history(&self) -> &[(ReplaceRequest, BatchOutcome)] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
