//! Fire-and-forget feedback cues.
//!
//! The core names the moment; the front-end decides what it sounds like.

use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    /// An exercise crossed its target.
    Thud,
    /// Confirmation: timer started, rest day entered, focus started.
    Ding,
    /// The whole day's protocol is complete.
    Fanfare,
}

impl SoundCue {
    /// Cue for an event, if it has one.
    pub fn for_event(event: &Event) -> Option<Self> {
        match event {
            Event::ExerciseCompleted { .. } => Some(SoundCue::Thud),
            Event::DayCompleted { .. } => Some(SoundCue::Fanfare),
            Event::TimerStarted { .. } | Event::FocusStarted { .. } => Some(SoundCue::Ding),
            Event::RestDayToggled {
                is_rest_day: true, ..
            } => Some(SoundCue::Ding),
            _ => None,
        }
    }
}

pub trait Feedback: Send + Sync {
    /// Must not block and must not fail.
    fn play(&self, cue: SoundCue);
}

/// Silent feedback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn play(&self, _cue: SoundCue) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct RecordingFeedback {
        played: Mutex<Vec<SoundCue>>,
    }

    impl RecordingFeedback {
        pub fn played(&self) -> Vec<SoundCue> {
            self.played.lock().map(|p| p.clone()).unwrap_or_default()
        }
    }

    impl Feedback for RecordingFeedback {
        fn play(&self, cue: SoundCue) {
            if let Ok(mut played) = self.played.lock() {
                played.push(cue);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn cues_follow_events() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let rest_on = Event::RestDayToggled {
            date,
            is_rest_day: true,
            at: Utc::now(),
        };
        let rest_off = Event::RestDayToggled {
            date,
            is_rest_day: false,
            at: Utc::now(),
        };
        let done = Event::DayCompleted { date, at: Utc::now() };

        assert_eq!(SoundCue::for_event(&rest_on), Some(SoundCue::Ding));
        assert_eq!(SoundCue::for_event(&rest_off), None);
        assert_eq!(SoundCue::for_event(&done), Some(SoundCue::Fanfare));
    }
}
