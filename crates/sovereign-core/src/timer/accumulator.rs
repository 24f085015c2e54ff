//! Timed-value accumulation for timer exercises.
//!
//! The value is derived from wall-clock elapsed time since start, never
//! accumulated tick by tick, so a throttled or late poll cannot drift it:
//!
//! ```text
//! value = start_value + floor((now - start) / 1000)
//! ```
//!
//! The caller polls on a short interval and only pushes values that
//! differ from the last one emitted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedAccumulator {
    /// Timestamp (ms since epoch) when the timer was started.
    start_epoch_ms: u64,
    /// Exercise value at start.
    start_value: u32,
    last_emitted: u32,
}

impl TimedAccumulator {
    pub fn start(now_ms: u64, current_value: u32) -> Self {
        Self {
            start_epoch_ms: now_ms,
            start_value: current_value,
            last_emitted: current_value,
        }
    }

    pub fn start_value(&self) -> u32 {
        self.start_value
    }

    pub fn last_emitted(&self) -> u32 {
        self.last_emitted
    }

    /// Value implied by the elapsed wall-clock time. A clock that went
    /// backwards counts as zero elapsed.
    pub fn value_at(&self, now_ms: u64) -> u32 {
        let elapsed_secs = now_ms.saturating_sub(self.start_epoch_ms) / 1000;
        let elapsed = u32::try_from(elapsed_secs).unwrap_or(u32::MAX);
        self.start_value.saturating_add(elapsed)
    }

    /// Call periodically. Returns the new value only when it changed since
    /// the last emission.
    pub fn poll(&mut self, now_ms: u64) -> Option<u32> {
        let next = self.value_at(now_ms);
        if next == self.last_emitted {
            return None;
        }
        self.last_emitted = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_seconds_yield_five() {
        let mut acc = TimedAccumulator::start(10_000, 0);
        assert_eq!(acc.poll(15_000), Some(5));
    }

    #[test]
    fn sub_second_polls_emit_nothing() {
        let mut acc = TimedAccumulator::start(0, 7);
        for now in (100..1000).step_by(100) {
            assert_eq!(acc.poll(now), None);
        }
        assert_eq!(acc.poll(1000), Some(8));
        assert_eq!(acc.poll(1900), None);
    }

    #[test]
    fn late_poll_catches_up_without_drift() {
        // One poll after a long stall still lands on the wall-clock value.
        let mut acc = TimedAccumulator::start(0, 30);
        assert_eq!(acc.poll(61_500), Some(91));
        assert_eq!(acc.last_emitted(), 91);
        assert_eq!(acc.start_value(), 30);
    }

    #[test]
    fn clock_going_backwards_is_clamped() {
        let mut acc = TimedAccumulator::start(5_000, 3);
        assert_eq!(acc.value_at(1_000), 3);
        assert_eq!(acc.poll(1_000), None);
    }
}
