//! Daily progress transitions.
//!
//! All functions here are pure: they take a snapshot and return a new one,
//! so callers can diff `before`/`after` to find completion edges.

use chrono::NaiveDate;

use crate::catalog::{self, Section};
use crate::model::{DailyProgress, ExerciseProgress, UserStats};

/// A record for `date` with every catalog exercise at zero.
pub fn fresh_day(date: NaiveDate) -> DailyProgress {
    DailyProgress {
        date,
        exercises: Section::Main
            .exercises()
            .iter()
            .map(ExerciseProgress::zero)
            .collect(),
        warmup_progress: Section::Warmup
            .exercises()
            .iter()
            .map(ExerciseProgress::zero)
            .collect(),
        is_all_one_set_day: false,
        is_rest_day: false,
    }
}

/// Today's record: a copy of the stored one, or a fresh one.
pub fn derive_daily_progress(stats: &UserStats, today: NaiveDate) -> DailyProgress {
    stats
        .day(today)
        .cloned()
        .unwrap_or_else(|| fresh_day(today))
}

/// Merge a raw value for one exercise into the record.
///
/// No-op (returns an unchanged copy) when the exercise is not in the
/// section's catalog or the day is a rest day. Warm-up values are clamped
/// to target; main values pass through and may exceed it.
pub fn apply_progress_update(
    progress: &DailyProgress,
    exercise_id: &str,
    raw_value: u32,
    section: Section,
) -> DailyProgress {
    let Some(exercise) = catalog::find(section, exercise_id) else {
        tracing::debug!(exercise_id, %section, "update for unknown exercise ignored");
        return progress.clone();
    };
    if progress.is_rest_day {
        return progress.clone();
    }

    let final_value = if section.is_warmup() {
        raw_value.min(exercise.target)
    } else {
        raw_value
    };
    let is_complete = final_value >= exercise.target;

    let mut next = progress.clone();
    let entries = next.entries_mut(section);
    match entries.iter_mut().find(|p| p.exercise_id == exercise_id) {
        Some(entry) => {
            entry.current_value = final_value;
            entry.is_complete = is_complete;
        }
        None => entries.push(ExerciseProgress {
            exercise_id: exercise_id.to_string(),
            current_value: final_value,
            is_complete,
            is_one_set: false,
        }),
    }
    next
}

/// True when the exercise crossed from incomplete to complete.
pub fn completion_edge(
    before: &DailyProgress,
    after: &DailyProgress,
    section: Section,
    exercise_id: &str,
) -> bool {
    !before.is_complete(section, exercise_id) && after.is_complete(section, exercise_id)
}

/// True when every main exercise just became complete.
pub fn day_completion_edge(before: &DailyProgress, after: &DailyProgress) -> bool {
    !before.all_main_complete() && after.all_main_complete()
}

pub fn toggle_rest_day(progress: &DailyProgress) -> DailyProgress {
    DailyProgress {
        is_rest_day: !progress.is_rest_day,
        ..progress.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn fresh_store_yields_zeroed_record() {
        let progress = derive_daily_progress(&UserStats::default(), today());
        assert_eq!(progress.date, today());
        assert!(!progress.is_rest_day);
        assert_eq!(progress.exercises.len(), catalog::EXERCISES.len());
        assert_eq!(progress.warmup_progress.len(), catalog::WARMUP_EXERCISES.len());
        assert!(progress
            .exercises
            .iter()
            .chain(&progress.warmup_progress)
            .all(|p| p.current_value == 0 && !p.is_complete));
    }

    #[test]
    fn existing_record_is_copied_not_recreated() {
        let mut stats = UserStats::default();
        let stored = apply_progress_update(&fresh_day(today()), "squats", 40, Section::Main);
        stats.upsert_day(stored.clone());

        let derived = derive_daily_progress(&stats, today());
        assert_eq!(derived, stored);
        assert_eq!(stats.history.len(), 1);
    }

    #[test]
    fn warmup_overshoot_is_clamped() {
        let day = fresh_day(today());
        let next = apply_progress_update(&day, "neck-nods-lr", 150, Section::Warmup);
        let entry = next.entry(Section::Warmup, "neck-nods-lr").unwrap();
        assert_eq!(entry.current_value, 100);
        assert!(entry.is_complete);
    }

    #[test]
    fn main_overshoot_is_kept_as_overtime() {
        let day = fresh_day(today());
        let next = apply_progress_update(&day, "squats", 150, Section::Main);
        let entry = next.entry(Section::Main, "squats").unwrap();
        assert_eq!(entry.current_value, 150);
        assert!(entry.is_complete);
    }

    #[test]
    fn target_boundary_is_complete() {
        let day = fresh_day(today());
        let at = apply_progress_update(&day, "crunches", 100, Section::Main);
        let below = apply_progress_update(&day, "crunches", 99, Section::Main);
        assert!(at.is_complete(Section::Main, "crunches"));
        assert!(!below.is_complete(Section::Main, "crunches"));
    }

    #[test]
    fn unknown_exercise_is_a_no_op() {
        let day = fresh_day(today());
        assert_eq!(apply_progress_update(&day, "burpees", 10, Section::Main), day);
        // Right id, wrong section.
        assert_eq!(apply_progress_update(&day, "squats", 10, Section::Warmup), day);
    }

    #[test]
    fn rest_day_rejects_updates() {
        let resting = toggle_rest_day(&fresh_day(today()));
        assert!(resting.is_rest_day);
        assert_eq!(apply_progress_update(&resting, "squats", 10, Section::Main), resting);
    }

    #[test]
    fn toggling_rest_twice_restores_record() {
        let day = apply_progress_update(&fresh_day(today()), "squats", 3, Section::Main);
        assert_eq!(toggle_rest_day(&toggle_rest_day(&day)), day);
    }

    #[test]
    fn input_snapshot_is_not_mutated() {
        let day = fresh_day(today());
        let _ = apply_progress_update(&day, "squats", 10, Section::Main);
        assert_eq!(day.value_of(Section::Main, "squats"), 0);
    }

    #[test]
    fn missing_entry_is_appended() {
        let mut day = fresh_day(today());
        day.exercises.retain(|p| p.exercise_id != "plank");
        let next = apply_progress_update(&day, "plank", 30, Section::Main);
        assert_eq!(next.value_of(Section::Main, "plank"), 30);
        assert_eq!(next.exercises.len(), catalog::EXERCISES.len());
    }

    #[test]
    fn completion_edge_fires_once() {
        let day = fresh_day(today());
        let done = apply_progress_update(&day, "squats", 100, Section::Main);
        let more = apply_progress_update(&done, "squats", 101, Section::Main);
        assert!(completion_edge(&day, &done, Section::Main, "squats"));
        assert!(!completion_edge(&done, &more, Section::Main, "squats"));
    }

    #[test]
    fn day_completion_edge_needs_every_main_exercise() {
        let mut day = fresh_day(today());
        for ex in catalog::EXERCISES.iter().skip(1) {
            day = apply_progress_update(&day, ex.id, ex.target, Section::Main);
        }
        assert!(!day.all_main_complete());
        let first = &catalog::EXERCISES[0];
        let done = apply_progress_update(&day, first.id, first.target, Section::Main);
        assert!(day_completion_edge(&day, &done));
    }

    fn any_exercise() -> impl Strategy<Value = (Section, &'static catalog::Exercise)> {
        let all: Vec<_> = catalog::EXERCISES
            .iter()
            .map(|e| (Section::Main, e))
            .chain(catalog::WARMUP_EXERCISES.iter().map(|e| (Section::Warmup, e)))
            .collect();
        proptest::sample::select(all)
    }

    proptest! {
        #[test]
        fn completion_matches_target((section, ex) in any_exercise(), value in 0u32..5_000) {
            let next = apply_progress_update(&fresh_day(today()), ex.id, value, section);
            prop_assert_eq!(next.is_complete(section, ex.id), value >= ex.target);
        }

        #[test]
        fn stored_value_respects_section((section, ex) in any_exercise(), value in 0u32..5_000) {
            let next = apply_progress_update(&fresh_day(today()), ex.id, value, section);
            let expected = if section.is_warmup() { value.min(ex.target) } else { value };
            prop_assert_eq!(next.value_of(section, ex.id), expected);
        }

        #[test]
        fn same_update_twice_is_idempotent((section, ex) in any_exercise(), value in 0u32..5_000) {
            let once = apply_progress_update(&fresh_day(today()), ex.id, value, section);
            let twice = apply_progress_update(&once, ex.id, value, section);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn rest_day_freezes_record((section, ex) in any_exercise(), value in 0u32..5_000) {
            let resting = toggle_rest_day(&fresh_day(today()));
            prop_assert_eq!(apply_progress_update(&resting, ex.id, value, section), resting);
        }
    }
}
