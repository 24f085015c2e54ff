//! # Sovereign Soul Core Library
//!
//! Core logic for the Sovereign Soul daily workout tracker. Every operation
//! is available through the standalone `sovereign` CLI, which is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Tracker**: pure transitions over today's [`DailyProgress`] record
//!   (merge a value, detect completion edges, toggle a rest day) and the
//!   [`DayMode`] state machine for rest day vs focus mode
//! - **Timer**: wall-clock [`TimedAccumulator`] for timer exercises, with
//!   a screen wake lock held while one runs
//! - **Storage**: SQLite key/value persistence of the [`UserStats`]
//!   aggregate with debounced write-back, and TOML configuration
//! - **Session**: the single owner of today's state; the caller drives it
//!   with [`Session::poll`]
//!
//! ## Key Components
//!
//! - [`Session`]: input, timers, modes and persistence in one place
//! - [`catalog`]: the fixed main and warm-up exercise lists
//! - [`StatsStore`]: load/save with legacy-key migration
//! - [`QuoteClient`]: optional motivational quotes and form tips

pub mod catalog;
pub mod clock;
pub mod error;
pub mod events;
pub mod feedback;
pub mod format;
pub mod history;
pub mod model;
pub mod quotes;
pub mod session;
pub mod storage;
pub mod timer;
pub mod tools;
pub mod tracker;

pub use catalog::{Exercise, ExerciseKind, Section};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::{Event, FocusEndReason, TimerStopReason};
pub use feedback::{Feedback, NoFeedback, SoundCue};
pub use history::{CalendarMonth, DayDetail, DayStatus};
pub use model::{DailyProgress, ExerciseProgress, UserProfile, UserStats};
pub use quotes::QuoteClient;
pub use session::{Session, SessionBuilder};
pub use storage::{Config, Database, StatsStore};
pub use timer::{NoWakeLock, TimedAccumulator, WakeLock, WakeLockError, WakeLockGuard};
pub use tools::{Stopwatch, TapCounter};
pub use tracker::{ChallengeMode, DayMode, FocusSession};
