//! Quick tools: a free-standing tap counter and a stopwatch.
//!
//! Neither touches the day's record.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapCounter {
    count: u64,
}

impl TapCounter {
    pub fn tap(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Wall-clock stopwatch. Elapsed time is banked on pause and derived from
/// the clock while running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    banked_ms: u64,
    running_since_ms: Option<u64>,
}

impl Stopwatch {
    pub fn is_running(&self) -> bool {
        self.running_since_ms.is_some()
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.running_since_ms.is_none() {
            self.running_since_ms = Some(now_ms);
        }
    }

    pub fn pause(&mut self, now_ms: u64) {
        if let Some(since) = self.running_since_ms.take() {
            self.banked_ms = self.banked_ms.saturating_add(now_ms.saturating_sub(since));
        }
    }

    /// Start when paused, pause when running. Returns the new running state.
    pub fn toggle(&mut self, now_ms: u64) -> bool {
        if self.is_running() {
            self.pause(now_ms);
        } else {
            self.start(now_ms);
        }
        self.is_running()
    }

    /// Stop and zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        let live = self
            .running_since_ms
            .map(|since| now_ms.saturating_sub(since))
            .unwrap_or(0);
        self.banked_ms.saturating_add(live)
    }

    pub fn elapsed_secs(&self, now_ms: u64) -> u64 {
        self.elapsed_ms(now_ms) / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_counter_counts_and_resets() {
        let mut counter = TapCounter::default();
        counter.tap();
        counter.tap();
        assert_eq!(counter.tap(), 3);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn stopwatch_banks_time_across_pauses() {
        let mut sw = Stopwatch::default();
        sw.start(0);
        sw.pause(4_500);
        assert_eq!(sw.elapsed_secs(100_000), 4);

        assert!(sw.toggle(10_000));
        assert_eq!(sw.elapsed_ms(11_000), 5_500);
        assert!(!sw.toggle(12_000));
        assert_eq!(sw.elapsed_secs(50_000), 6);
    }

    #[test]
    fn double_start_keeps_first_timestamp() {
        let mut sw = Stopwatch::default();
        sw.start(1_000);
        sw.start(5_000);
        assert_eq!(sw.elapsed_ms(6_000), 5_000);
        sw.reset();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(9_000), 0);
    }
}
