//! Request generations for overlapping loads.
//!
//! Loads cannot be cancelled once sent to the worker. Each one is tagged with
//! an increasing id so a response that arrives after a newer request was
//! issued can be recognised and dropped.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: Option<RequestId>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id; it becomes the only current one.
    pub fn next_id(&mut self) -> RequestId {
        let next = RequestId(self.latest.map_or(1, |id| id.0 + 1));
        self.latest = Some(next);
        next
    }

    pub fn latest(&self) -> Option<RequestId> {
        self.latest
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest == Some(id)
    }
}
