//! End-to-end tracker scenarios through the public API: a session over an
//! on-disk store, driven by a hand clock.

use std::sync::Arc;

use chrono::NaiveDate;
use sovereign_core::catalog::{self, Section};
use sovereign_core::storage::{Database, StatsStore, STORAGE_KEY};
use sovereign_core::tracker::{apply_progress_update, derive_daily_progress, toggle_rest_day};
use sovereign_core::{ManualClock, Session, UserStats};
use tempfile::TempDir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn open(dir: &TempDir, clock: &Arc<ManualClock>) -> Session {
    let store = StatsStore::new(Database::open_at(&dir.path().join("sovereign.db")).unwrap());
    Session::builder().clock(clock.clone()).open(store).unwrap()
}

#[test]
fn test_fresh_store_derives_zeroed_day() {
    let today = derive_daily_progress(&UserStats::default(), date());
    assert_eq!(today.exercises.len(), catalog::EXERCISES.len());
    assert_eq!(today.warmup_progress.len(), catalog::WARMUP_EXERCISES.len());
    assert!(today
        .exercises
        .iter()
        .chain(&today.warmup_progress)
        .all(|p| p.current_value == 0 && !p.is_complete));
    assert!(!today.is_rest_day);
}

#[test]
fn test_warmup_clamps_and_main_runs_over() {
    let today = derive_daily_progress(&UserStats::default(), date());

    let warm = apply_progress_update(&today, "belly-tucks", 150, Section::Warmup);
    let entry = warm.entry(Section::Warmup, "belly-tucks").unwrap();
    assert_eq!(entry.current_value, 100);
    assert!(entry.is_complete);

    let main = apply_progress_update(&today, "squats", 150, Section::Main);
    let entry = main.entry(Section::Main, "squats").unwrap();
    assert_eq!(entry.current_value, 150);
    assert!(entry.is_complete);
}

#[test]
fn test_rest_day_blocks_every_update() {
    let rested = toggle_rest_day(&derive_daily_progress(&UserStats::default(), date()));
    for ex in catalog::EXERCISES {
        assert_eq!(apply_progress_update(&rested, ex.id, 50, Section::Main), rested);
    }
    for ex in catalog::WARMUP_EXERCISES {
        assert_eq!(apply_progress_update(&rested, ex.id, 5, Section::Warmup), rested);
    }
}

#[test]
fn test_five_seconds_of_plank_is_five() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::at_date(date(), 6 * 3600 * 1000));
    let mut session = open(&dir, &clock);

    session.start_timer("plank", Section::Main);
    for _ in 0..50 {
        clock.advance_ms(100);
        session.poll().unwrap();
    }
    assert_eq!(session.value("plank", Section::Main), 5);
}

#[test]
fn test_malformed_document_loads_as_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sovereign.db");
    Database::open_at(&path)
        .unwrap()
        .kv_set(STORAGE_KEY, "{ not json")
        .unwrap();

    let stats = StatsStore::new(Database::open_at(&path).unwrap())
        .load()
        .unwrap();
    assert!(stats.history.is_empty());
    assert_eq!(stats, UserStats::default());
}

#[test]
fn test_progress_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::at_date(date(), 0));

    let mut session = open(&dir, &clock);
    session.bulk_add("sapate", Section::Main, 250);
    clock.advance_secs(3);
    session.poll().unwrap();
    session.shutdown();

    let session = open(&dir, &clock);
    assert_eq!(session.value("sapate", Section::Main), 250);
    assert_eq!(session.stats().history.len(), 1);
}
