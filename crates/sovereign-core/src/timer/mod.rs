mod accumulator;
mod wake_lock;

pub use accumulator::TimedAccumulator;
pub use wake_lock::{NoWakeLock, WakeLock, WakeLockError, WakeLockGuard};

#[cfg(test)]
pub(crate) use wake_lock::testing;
