//! Terminal stand-ins for the sound and screen wake-lock collaborators.

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

use sovereign_core::{Feedback, SoundCue, WakeLock, WakeLockError};

/// Rings the terminal bell on stderr so stdout stays machine-readable.
#[derive(Debug, Default, Clone, Copy)]
pub struct BellFeedback;

impl Feedback for BellFeedback {
    fn play(&self, cue: SoundCue) {
        let bells = match cue {
            SoundCue::Thud | SoundCue::Ding => "\x07",
            SoundCue::Fanfare => "\x07\x07\x07",
        };
        tracing::debug!(?cue, "feedback cue");
        let mut stderr = std::io::stderr();
        let _ = stderr.write_all(bells.as_bytes());
        let _ = stderr.flush();
    }
}

/// Keeps the machine awake by holding a `systemd-inhibit` child process.
///
/// Several timers may hold the lock at once; the child lives until the
/// last holder releases it.
#[derive(Debug)]
pub struct InhibitWakeLock {
    program: String,
    args: Vec<String>,
    state: Mutex<Inhibitor>,
}

#[derive(Debug, Default)]
struct Inhibitor {
    holders: usize,
    child: Option<Child>,
}

impl Default for InhibitWakeLock {
    fn default() -> Self {
        Self::with_command(
            "systemd-inhibit",
            [
                "--what=idle:sleep",
                "--who=sovereign",
                "--why=exercise timer running",
                "sleep",
                "infinity",
            ],
        )
    }
}

impl InhibitWakeLock {
    pub fn with_command<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            state: Mutex::new(Inhibitor::default()),
        }
    }

    fn spawn(&self) -> Result<Child, WakeLockError> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| WakeLockError::RequestFailed(e.to_string()))
    }
}

impl WakeLock for InhibitWakeLock {
    fn acquire(&self) -> Result<(), WakeLockError> {
        if !cfg!(target_os = "linux") {
            return Err(WakeLockError::Unsupported);
        }
        let mut state = self
            .state
            .lock()
            .map_err(|e| WakeLockError::RequestFailed(e.to_string()))?;
        if state.child.is_none() {
            state.child = Some(self.spawn()?);
        }
        state.holders += 1;
        Ok(())
    }

    fn release(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.holders = state.holders.saturating_sub(1);
        if state.holders > 0 {
            return;
        }
        if let Some(mut child) = state.child.take() {
            if let Err(e) = child.kill() {
                tracing::debug!(error = %e, "inhibitor already gone");
            }
            let _ = child.wait();
        }
    }
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    fn child_running(lock: &InhibitWakeLock) -> bool {
        let mut state = lock.state.lock().unwrap();
        match state.child.as_mut() {
            Some(child) => child.try_wait().unwrap().is_none(),
            None => false,
        }
    }

    #[test]
    fn inhibitor_outlives_all_but_the_last_holder() {
        let lock = InhibitWakeLock::with_command("sleep", ["30"]);
        lock.acquire().unwrap();
        lock.acquire().unwrap();
        assert!(child_running(&lock));

        lock.release();
        assert!(child_running(&lock));

        lock.release();
        assert!(!child_running(&lock));
        assert_eq!(lock.state.lock().unwrap().holders, 0);
    }

    #[test]
    fn stray_release_does_not_underflow() {
        let lock = InhibitWakeLock::with_command("sleep", ["30"]);
        lock.release();
        lock.acquire().unwrap();
        assert!(child_running(&lock));
        lock.release();
        assert!(!child_running(&lock));
    }
}
