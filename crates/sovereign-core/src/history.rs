//! Calendar view over the stored history.
//!
//! Weeks start on Saturday.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::catalog::{self, Section};
use crate::model::{DailyProgress, UserStats};

pub const WEEKDAY_HEADERS: [&str; 7] = ["SAT", "SUN", "MON", "TUE", "WED", "THU", "FRI"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    NoRecord,
    Rest,
    /// Every main exercise complete.
    Complete,
    Partial,
}

impl DayStatus {
    pub fn of(progress: Option<&DailyProgress>) -> Self {
        match progress {
            None => DayStatus::NoRecord,
            Some(p) if p.is_rest_day => DayStatus::Rest,
            Some(p) if p.all_main_complete() => DayStatus::Complete,
            Some(_) => DayStatus::Partial,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub status: DayStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Saturday-first week.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// `None` for an invalid year/month.
    pub fn build(stats: &UserStats, year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let leading_blanks = (first.weekday().num_days_from_sunday() + 1) % 7;

        let days = first
            .iter_days()
            .take_while(|d| *d < next_month)
            .map(|date| CalendarDay {
                date,
                status: DayStatus::of(stats.day(date)),
            })
            .collect();

        Some(Self {
            year,
            month,
            leading_blanks,
            days,
        })
    }

    /// Rows of seven cells, `None` for blanks.
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let cells: Vec<Option<&CalendarDay>> = std::iter::repeat(None)
            .take(self.leading_blanks as usize)
            .chain(self.days.iter().map(Some))
            .collect();
        cells
            .chunks(7)
            .map(|row| {
                let mut row = row.to_vec();
                row.resize(7, None);
                row
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    pub exercise_id: String,
    pub name: String,
    pub value: u32,
    pub target: u32,
    pub is_complete: bool,
    /// Amount past target (main exercises only).
    pub overtime: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub exercises: Vec<DetailLine>,
    pub warmups_complete: usize,
    pub warmups_total: usize,
}

impl DayDetail {
    pub fn build(stats: &UserStats, date: NaiveDate) -> Option<Self> {
        let progress = stats.day(date)?;
        let exercises = progress
            .exercises
            .iter()
            .filter_map(|p| {
                let def = catalog::find(Section::Main, &p.exercise_id)?;
                Some(DetailLine {
                    exercise_id: p.exercise_id.clone(),
                    name: def.name.to_string(),
                    value: p.current_value,
                    target: def.target,
                    is_complete: p.is_complete,
                    overtime: p.current_value.saturating_sub(def.target),
                })
            })
            .collect();

        Some(Self {
            date,
            status: DayStatus::of(Some(progress)),
            exercises,
            warmups_complete: progress
                .warmup_progress
                .iter()
                .filter(|p| p.is_complete)
                .count(),
            warmups_total: progress.warmup_progress.len(),
        })
    }
}
