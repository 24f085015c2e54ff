//! Keep-the-screen-awake resource held while a timer runs.
//!
//! [`WakeLockGuard`] is the only way the core touches a [`WakeLock`]: it
//! acquires on construction and releases on drop, so every exit path
//! (pause, completion, teardown, panic unwinding) gives the lock back.
//! A failed acquisition is logged and the guard simply holds nothing.

use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WakeLockError {
    #[error("wake lock not supported on this platform")]
    Unsupported,

    #[error("wake lock request failed: {0}")]
    RequestFailed(String),
}

pub trait WakeLock: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when the platform refuses or cannot provide the lock.
    fn acquire(&self) -> Result<(), WakeLockError>;

    fn release(&self);
}

/// Wake lock for front-ends without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWakeLock;

impl WakeLock for NoWakeLock {
    fn acquire(&self) -> Result<(), WakeLockError> {
        Ok(())
    }

    fn release(&self) {}
}

#[must_use = "the wake lock is released as soon as the guard is dropped"]
pub struct WakeLockGuard {
    lock: Option<Arc<dyn WakeLock>>,
}

impl WakeLockGuard {
    pub fn acquire(lock: &Arc<dyn WakeLock>) -> Self {
        match lock.acquire() {
            Ok(()) => {
                tracing::debug!("wake lock engaged");
                Self {
                    lock: Some(Arc::clone(lock)),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "wake lock unavailable, continuing without it");
                Self { lock: None }
            }
        }
    }

    pub fn is_held(&self) -> bool {
        self.lock.is_some()
    }
}

impl Drop for WakeLockGuard {
    fn drop(&mut self) {
        if let Some(lock) = self.lock.take() {
            lock.release();
            tracing::debug!("wake lock released");
        }
    }
}

impl std::fmt::Debug for WakeLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WakeLockGuard")
            .field("held", &self.is_held())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CountingWakeLock;
    use super::*;

    #[test]
    fn guard_releases_on_drop() {
        let counting = Arc::new(CountingWakeLock::default());
        let lock: Arc<dyn WakeLock> = counting.clone();
        {
            let guard = WakeLockGuard::acquire(&lock);
            assert!(guard.is_held());
            assert_eq!(counting.held(), 1);
        }
        assert_eq!(counting.held(), 0);
    }

    #[test]
    fn failed_acquire_is_not_fatal_and_never_released() {
        let counting = Arc::new(CountingWakeLock {
            fail: true,
            ..Default::default()
        });
        let lock: Arc<dyn WakeLock> = counting.clone();
        let guard = WakeLockGuard::acquire(&lock);
        assert!(!guard.is_held());
        drop(guard);
        assert_eq!(counting.released.load(std::sync::atomic::Ordering::SeqCst), 0);
    }
}
