//! Calendar and per-day detail.

use chrono::{Datelike, NaiveDate};
use clap::{Args, Subcommand};
use serde::Serialize;
use sovereign_core::history::{CalendarDay, CalendarMonth, DayDetail, WEEKDAY_HEADERS};
use sovereign_core::storage::Config;
use sovereign_core::{format, ValidationError};

use super::{open_session, print_json, CmdResult};

#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    action: Option<HistoryAction>,
    /// Month to show (defaults to the current one)
    #[arg(long, value_name = "YYYY-MM")]
    month: Option<String>,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Exercises logged on one date
    Day {
        /// Date as YYYY-MM-DD
        date: NaiveDate,
    },
}

#[derive(Serialize)]
struct MonthView<'a> {
    year: i32,
    month: u32,
    headers: [&'static str; 7],
    weeks: Vec<Vec<Option<&'a CalendarDay>>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayView {
    label: String,
    #[serde(flatten)]
    detail: DayDetail,
}

pub fn run(args: HistoryArgs) -> CmdResult {
    let config = Config::load_or_default();
    let session = open_session(&config)?;

    match args.action {
        Some(HistoryAction::Day { date }) => {
            let detail = DayDetail::build(session.stats(), date)
                .ok_or_else(|| format!("no record for {date}"))?;
            print_json(&DayView {
                label: format::short_date(date),
                detail,
            })?;
        }
        None => {
            let (year, month) = match args.month.as_deref() {
                Some(raw) => parse_month(raw)?,
                None => {
                    let today = session.today().date;
                    (today.year(), today.month())
                }
            };
            let calendar = CalendarMonth::build(session.stats(), year, month)
                .ok_or_else(|| format!("invalid month {year}-{month:02}"))?;
            print_json(&MonthView {
                year,
                month,
                headers: WEEKDAY_HEADERS,
                weeks: calendar.weeks(),
            })?;
        }
    }

    session.shutdown();
    Ok(())
}

fn parse_month(raw: &str) -> Result<(i32, u32), ValidationError> {
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .map(|d| (d.year(), d.month()))
        .map_err(|e| ValidationError::InvalidValue {
            field: "month".into(),
            message: format!("expected YYYY-MM: {e}"),
        })
}
