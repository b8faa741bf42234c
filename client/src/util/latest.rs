//! Last-request-wins tagging for page fetches.

#[cfg(test)]
#[path = "latest_test.rs"]
mod latest_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out increasing tickets; only the newest ticket may apply its
/// response. Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct LatestRequest(Arc<AtomicU64>);

impl LatestRequest {
    /// Start a request, superseding every earlier ticket.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}
