//! Persisted data model.
//!
//! The whole history lives in one [`UserStats`] aggregate, serialized as a
//! single camelCase JSON document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Exercise, Section};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgress {
    pub exercise_id: String,
    pub current_value: u32,
    pub is_complete: bool,
    /// Legacy flag, carried for document compatibility only.
    #[serde(default)]
    pub is_one_set: bool,
}

impl ExerciseProgress {
    pub fn zero(exercise: &Exercise) -> Self {
        Self {
            exercise_id: exercise.id.to_string(),
            current_value: 0,
            is_complete: false,
            is_one_set: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    pub date: NaiveDate,
    #[serde(default)]
    pub exercises: Vec<ExerciseProgress>,
    #[serde(default)]
    pub warmup_progress: Vec<ExerciseProgress>,
    #[serde(default)]
    pub is_all_one_set_day: bool,
    #[serde(default)]
    pub is_rest_day: bool,
}

impl DailyProgress {
    pub fn entries(&self, section: Section) -> &[ExerciseProgress] {
        match section {
            Section::Warmup => &self.warmup_progress,
            Section::Main => &self.exercises,
        }
    }

    pub fn entries_mut(&mut self, section: Section) -> &mut Vec<ExerciseProgress> {
        match section {
            Section::Warmup => &mut self.warmup_progress,
            Section::Main => &mut self.exercises,
        }
    }

    pub fn entry(&self, section: Section, exercise_id: &str) -> Option<&ExerciseProgress> {
        self.entries(section)
            .iter()
            .find(|p| p.exercise_id == exercise_id)
    }

    /// Current value for an exercise, zero when the record has no entry.
    pub fn value_of(&self, section: Section, exercise_id: &str) -> u32 {
        self.entry(section, exercise_id)
            .map(|p| p.current_value)
            .unwrap_or(0)
    }

    pub fn is_complete(&self, section: Section, exercise_id: &str) -> bool {
        self.entry(section, exercise_id)
            .map(|p| p.is_complete)
            .unwrap_or(false)
    }

    /// Every main exercise for the day is complete.
    pub fn all_main_complete(&self) -> bool {
        !self.exercises.is_empty() && self.exercises.iter().all(|p| p.is_complete)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Sovereign Warrior".into(),
            age: 0,
            gender: "Warrior".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Reserved gate, never read.
    #[serde(default)]
    pub unlocked_challenges: bool,
    #[serde(default)]
    pub history: Vec<DailyProgress>,
    /// Day-of-week indices, never read by the tracker.
    #[serde(default)]
    pub rest_days_preference: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            unlocked_challenges: false,
            history: Vec::new(),
            rest_days_preference: Vec::new(),
            profile: Some(UserProfile::default()),
        }
    }
}

impl UserStats {
    pub fn day(&self, date: NaiveDate) -> Option<&DailyProgress> {
        self.history.iter().find(|d| d.date == date)
    }

    /// Replace the record for `progress.date`, or append it.
    ///
    /// Keeps at most one record per date.
    pub fn upsert_day(&mut self, progress: DailyProgress) {
        match self.history.iter_mut().find(|d| d.date == progress.date) {
            Some(existing) => *existing = progress,
            None => self.history.push(progress),
        }
    }
}
