//! Counter input: today, tap, add, set.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sovereign_core::catalog::{Exercise, ExerciseKind, Section};
use sovereign_core::storage::Config;
use sovereign_core::{format, DayMode, Event, Session};

use super::{open_session, print_json, resolve, CmdResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ExerciseKind,
    pub target: u32,
    pub value: u32,
    pub display: String,
    pub percent: u32,
    pub is_complete: bool,
}

impl CardView {
    pub fn of(session: &Session, exercise: &'static Exercise, section: Section) -> Self {
        let value = session.value(exercise.id, section);
        Self {
            id: exercise.id,
            name: exercise.name,
            kind: exercise.kind,
            target: exercise.target,
            value,
            display: format::exercise_value(exercise, value),
            percent: format::percent(value, exercise.target),
            is_complete: session.today().is_complete(section, exercise.id),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TodayView<'a> {
    date: NaiveDate,
    time: String,
    section: Section,
    is_rest_day: bool,
    mode: &'a DayMode,
    focus_remaining: Option<String>,
    all_main_complete: bool,
    exercises: Vec<CardView>,
}

#[derive(Serialize)]
struct UpdateView<'a> {
    exercise: CardView,
    events: &'a [Event],
}

pub fn today(warmup: bool) -> CmdResult {
    let config = Config::load_or_default();
    let mut session = open_session(&config)?;
    let section = Section::from_warmup_flag(warmup);

    let view = TodayView {
        date: session.today().date,
        time: format::clock(Utc::now()),
        section,
        is_rest_day: session.today().is_rest_day,
        mode: session.mode(),
        focus_remaining: session.focus_remaining_secs().map(format::hms),
        all_main_complete: session.today().all_main_complete(),
        exercises: section
            .exercises()
            .iter()
            .map(|ex| CardView::of(&session, ex, section))
            .collect(),
    };
    print_json(&view)?;

    session.flush()?;
    Ok(())
}

pub fn tap(id: &str, warmup: bool) -> CmdResult {
    let exercise = resolve(id, warmup)?;
    if exercise.is_timer() {
        return Err(format!("'{id}' is a timed exercise, use `sovereign timer {id}`").into());
    }
    update(exercise, warmup, |session, section| session.tap(exercise.id, section))
}

pub fn add(id: &str, amount: u32, warmup: bool) -> CmdResult {
    let exercise = resolve(id, warmup)?;
    update(exercise, warmup, |session, section| {
        session.bulk_add(exercise.id, section, amount)
    })
}

pub fn set(id: &str, value: u32, warmup: bool) -> CmdResult {
    let exercise = resolve(id, warmup)?;
    update(exercise, warmup, |session, section| {
        session.update_progress(exercise.id, value, section)
    })
}

fn update(
    exercise: &'static Exercise,
    warmup: bool,
    apply: impl FnOnce(&mut Session, Section) -> Vec<Event>,
) -> CmdResult {
    let config = Config::load_or_default();
    let mut session = open_session(&config)?;
    let section = Section::from_warmup_flag(warmup);

    let events = apply(&mut session, section);
    if events.is_empty() && session.mode().is_resting() {
        tracing::warn!("today is a rest day, progress is frozen");
    }
    print_json(&UpdateView {
        exercise: CardView::of(&session, exercise, section),
        events: &events,
    })?;

    session.flush()?;
    Ok(())
}
