use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Section;
use crate::tracker::ChallengeMode;

/// Every state change in a session produces an Event.
/// The front-end prints them; feedback cues are derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Today's record was looked up (or created) for a new date.
    DayStarted {
        date: NaiveDate,
        created: bool,
        at: DateTime<Utc>,
    },
    ProgressUpdated {
        date: NaiveDate,
        section: Section,
        exercise_id: String,
        value: u32,
        is_complete: bool,
        at: DateTime<Utc>,
    },
    /// Completion edge: incomplete -> complete.
    ExerciseCompleted {
        date: NaiveDate,
        section: Section,
        exercise_id: String,
        value: u32,
        at: DateTime<Utc>,
    },
    /// Every main exercise of the day became complete.
    DayCompleted {
        date: NaiveDate,
        at: DateTime<Utc>,
    },
    RestDayToggled {
        date: NaiveDate,
        is_rest_day: bool,
        at: DateTime<Utc>,
    },
    FocusStarted {
        mode: ChallengeMode,
        duration_secs: u64,
        ends_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    FocusEnded {
        mode: ChallengeMode,
        reason: FocusEndReason,
        at: DateTime<Utc>,
    },
    TimerStarted {
        section: Section,
        exercise_id: String,
        from_value: u32,
        at: DateTime<Utc>,
    },
    TimerStopped {
        section: Section,
        exercise_id: String,
        value: u32,
        reason: TimerStopReason,
        at: DateTime<Utc>,
    },
    ProgressSaved {
        date: NaiveDate,
        at: DateTime<Utc>,
    },
    DataReset {
        at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusEndReason {
    Cancelled,
    Expired,
    /// Entering a rest day cancels focus.
    RestDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStopReason {
    Paused,
    /// Warm-up timer hit its target and was clamped.
    TargetReached,
    /// Completion edge auto-pause.
    Completed,
    /// Rest day entered or the day rolled over.
    Teardown,
}
