//! Debounced write-back.
//!
//! One pending write token at a time. Every mutation replaces it with a
//! fresh token whose deadline is `delay` after that mutation, so a burst
//! of taps coalesces into a single write once the burst goes quiet.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingWrite {
    pub token: u64,
    pub due_at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct DebouncedWrite {
    delay_ms: u64,
    next_token: u64,
    pending: Option<PendingWrite>,
}

impl DebouncedWrite {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            next_token: 1,
            pending: None,
        }
    }

    /// Replace any pending write with a new one due `delay` from `now_ms`.
    pub fn schedule(&mut self, now_ms: u64) -> PendingWrite {
        let pending = PendingWrite {
            token: self.next_token,
            due_at_ms: now_ms.saturating_add(self.delay_ms),
        };
        self.next_token += 1;
        self.pending = Some(pending);
        pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending write if its deadline has passed.
    pub fn take_due(&mut self, now_ms: u64) -> Option<PendingWrite> {
        match self.pending {
            Some(p) if now_ms >= p.due_at_ms => self.pending.take(),
            _ => None,
        }
    }

    /// Take the pending write regardless of its deadline.
    pub fn take(&mut self) -> Option<PendingWrite> {
        self.pending.take()
    }

    /// Drop the pending write without performing it.
    pub fn cancel(&mut self) -> Option<PendingWrite> {
        self.pending.take()
    }
}
