//! Display helpers shared by front-ends.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::catalog::{Exercise, ExerciseKind};

/// `m:ss` for timer exercise values.
pub fn timer_value(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// `HH:MM:SS` for the stopwatch and focus countdown.
pub fn hms(total_secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}

/// `dd/mm/yy`.
pub fn short_date(date: NaiveDate) -> String {
    format!(
        "{:02}/{:02}/{:02}",
        date.day(),
        date.month(),
        date.year().rem_euclid(100)
    )
}

/// 24-hour `HH:MM:SS`.
pub fn clock(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Value as shown on an exercise card.
pub fn exercise_value(exercise: &Exercise, value: u32) -> String {
    match exercise.kind {
        ExerciseKind::Timer => timer_value(value),
        ExerciseKind::Counter => value.to_string(),
    }
}

/// Percentage of target, capped at 100.
pub fn percent(value: u32, target: u32) -> u32 {
    if target == 0 {
        return 100;
    }
    ((u64::from(value) * 100 / u64::from(target)).min(100)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find, Section};

    #[test]
    fn formats() {
        assert_eq!(timer_value(0), "0:00");
        assert_eq!(timer_value(605), "10:05");
        assert_eq!(hms(3_725), "01:02:05");
        assert_eq!(short_date(NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()), "09/01/26");
        let at = NaiveDate::from_ymd_opt(2026, 1, 9)
            .unwrap()
            .and_hms_opt(7, 5, 3)
            .unwrap()
            .and_utc();
        assert_eq!(clock(at), "07:05:03");
    }

    #[test]
    fn exercise_values_follow_kind() {
        let plank = find(Section::Main, "plank").unwrap();
        let squats = find(Section::Main, "squats").unwrap();
        assert_eq!(exercise_value(plank, 90), "1:30");
        assert_eq!(exercise_value(squats, 90), "90");
        assert_eq!(percent(150, 100), 100);
        assert_eq!(percent(33, 100), 33);
    }
}
