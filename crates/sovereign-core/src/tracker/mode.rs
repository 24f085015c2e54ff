//! Rest day vs focus mode.
//!
//! The two modes are mutually exclusive, so they live in one enum instead
//! of two flags:
//!
//! ```text
//! Active  --toggle_rest-->  Resting  --toggle_rest-->  Active
//! Active  --start_focus-->  Focused  --stop/expire-->  Active
//! Focused --toggle_rest-->  Resting   (focus cancelled)
//! Resting --start_focus-->  Focused   (rest day cleared)
//! ```
//!
//! The rest flag is also persisted on the day record; focus is tracked
//! outside it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeMode {
    Normal,
    TwoHour,
    OneHour,
}

impl ChallengeMode {
    /// Countdown length, `None` for the untimed normal mode.
    pub fn duration_secs(self) -> Option<u64> {
        match self {
            ChallengeMode::Normal => None,
            ChallengeMode::TwoHour => Some(2 * 3600),
            ChallengeMode::OneHour => Some(3600),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChallengeMode::Normal => "normal",
            ChallengeMode::TwoHour => "two-hour",
            ChallengeMode::OneHour => "one-hour",
        }
    }
}

impl std::str::FromStr for ChallengeMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "normal" => Ok(ChallengeMode::Normal),
            "two-hour" | "2h" => Ok(ChallengeMode::TwoHour),
            "one-hour" | "1h" => Ok(ChallengeMode::OneHour),
            other => Err(ValidationError::InvalidValue {
                field: "challenge_mode".into(),
                message: format!("unknown mode '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for ChallengeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A running focus countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    pub mode: ChallengeMode,
    pub started_at_ms: u64,
    pub duration_secs: u64,
}

impl FocusSession {
    /// # Errors
    ///
    /// Returns an error for `ChallengeMode::Normal`, which has no countdown.
    pub fn start(mode: ChallengeMode, now_ms: u64) -> Result<Self, ValidationError> {
        let duration_secs = mode
            .duration_secs()
            .ok_or_else(|| ValidationError::UntimedChallenge(mode.to_string()))?;
        Ok(Self {
            mode,
            started_at_ms: now_ms,
            duration_secs,
        })
    }

    pub fn ends_at_ms(&self) -> u64 {
        self.started_at_ms
            .saturating_add(self.duration_secs.saturating_mul(1000))
    }

    /// Whole seconds left, rounded up so the display reads 0 only at the end.
    pub fn remaining_secs(&self, now_ms: u64) -> u64 {
        let remaining_ms = self.ends_at_ms().saturating_sub(now_ms);
        remaining_ms.div_ceil(1000)
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.ends_at_ms()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DayMode {
    Active,
    Resting,
    Focused(FocusSession),
}

/// Side effects of a mode change the caller has to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    /// New rest flag for today's record, when it changed.
    pub rest_day: Option<bool>,
    /// Focus session ended by this transition.
    pub cancelled_focus: Option<FocusSession>,
}

impl DayMode {
    /// Rebuild the mode from what is persisted. A rest day wins over a
    /// stored focus session; an expired session is dropped.
    pub fn from_parts(is_rest_day: bool, focus: Option<FocusSession>, now_ms: u64) -> Self {
        if is_rest_day {
            return DayMode::Resting;
        }
        match focus {
            Some(session) if !session.is_expired(now_ms) => DayMode::Focused(session),
            _ => DayMode::Active,
        }
    }

    pub fn is_resting(&self) -> bool {
        matches!(self, DayMode::Resting)
    }

    pub fn focus(&self) -> Option<&FocusSession> {
        match self {
            DayMode::Focused(session) => Some(session),
            _ => None,
        }
    }

    pub fn toggle_rest(&mut self) -> Transition {
        let (next, transition) = match *self {
            DayMode::Active => (
                DayMode::Resting,
                Transition {
                    rest_day: Some(true),
                    ..Default::default()
                },
            ),
            DayMode::Resting => (
                DayMode::Active,
                Transition {
                    rest_day: Some(false),
                    ..Default::default()
                },
            ),
            DayMode::Focused(session) => (
                DayMode::Resting,
                Transition {
                    rest_day: Some(true),
                    cancelled_focus: Some(session),
                },
            ),
        };
        *self = next;
        transition
    }

    pub fn start_focus(&mut self, session: FocusSession) -> Transition {
        let transition = match *self {
            DayMode::Active => Transition::default(),
            DayMode::Resting => Transition {
                rest_day: Some(false),
                ..Default::default()
            },
            DayMode::Focused(previous) => Transition {
                cancelled_focus: Some(previous),
                ..Default::default()
            },
        };
        *self = DayMode::Focused(session);
        transition
    }

    /// Leave focus mode; `None` when not focused.
    pub fn stop_focus(&mut self) -> Option<FocusSession> {
        let session = *self.focus()?;
        *self = DayMode::Active;
        Some(session)
    }

    /// End an expired countdown.
    pub fn expire(&mut self, now_ms: u64) -> Option<FocusSession> {
        match *self {
            DayMode::Focused(session) if session.is_expired(now_ms) => self.stop_focus(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus(now_ms: u64) -> FocusSession {
        FocusSession::start(ChallengeMode::OneHour, now_ms).unwrap()
    }

    #[test]
    fn normal_mode_has_no_countdown() {
        assert!(FocusSession::start(ChallengeMode::Normal, 0).is_err());
        assert_eq!(ChallengeMode::TwoHour.duration_secs(), Some(7200));
    }

    #[test]
    fn countdown_rounds_up() {
        let session = focus(0);
        assert_eq!(session.remaining_secs(0), 3600);
        assert_eq!(session.remaining_secs(1), 3600);
        assert_eq!(session.remaining_secs(999), 3600);
        assert_eq!(session.remaining_secs(1000), 3599);
        assert_eq!(session.remaining_secs(3_600_000), 0);
        assert!(session.is_expired(3_600_000));
    }

    #[test]
    fn rest_cancels_focus() {
        let mut mode = DayMode::Active;
        mode.start_focus(focus(0));
        let t = mode.toggle_rest();
        assert_eq!(mode, DayMode::Resting);
        assert_eq!(t.rest_day, Some(true));
        assert_eq!(t.cancelled_focus, Some(focus(0)));
    }

    #[test]
    fn focus_clears_rest() {
        let mut mode = DayMode::Resting;
        let t = mode.start_focus(focus(0));
        assert!(mode.focus().is_some());
        assert!(!mode.is_resting());
        assert_eq!(t.rest_day, Some(false));
    }

    #[test]
    fn leaving_rest_has_no_other_effect() {
        let mut mode = DayMode::Resting;
        let t = mode.toggle_rest();
        assert_eq!(mode, DayMode::Active);
        assert_eq!(
            t,
            Transition {
                rest_day: Some(false),
                cancelled_focus: None
            }
        );
    }

    #[test]
    fn expiry_returns_to_active() {
        let mut mode = DayMode::Focused(focus(0));
        assert!(mode.expire(10).is_none());
        assert!(mode.expire(3_600_000).is_some());
        assert_eq!(mode, DayMode::Active);
    }

    #[test]
    fn from_parts_prefers_rest_and_drops_expired_focus() {
        assert_eq!(DayMode::from_parts(true, Some(focus(0)), 0), DayMode::Resting);
        assert_eq!(DayMode::from_parts(false, Some(focus(0)), 3_600_000), DayMode::Active);
        assert_eq!(
            DayMode::from_parts(false, Some(focus(0)), 5),
            DayMode::Focused(focus(0))
        );
    }

    #[test]
    fn modes_parse_from_cli_spelling() {
        assert_eq!("two-hour".parse::<ChallengeMode>().unwrap(), ChallengeMode::TwoHour);
        assert_eq!("ONE_HOUR".parse::<ChallengeMode>().unwrap(), ChallengeMode::OneHour);
        assert!("forever".parse::<ChallengeMode>().is_err());
    }
}
