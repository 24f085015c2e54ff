pub mod config;
pub mod focus;
pub mod history;
pub mod profile;
pub mod progress;
pub mod quote;
pub mod reset;
pub mod rest;
pub mod timer;
pub mod tools;

use std::sync::Arc;

use serde::Serialize;
use sovereign_core::catalog::{self, Exercise, Section};
use sovereign_core::storage::{Config, StatsStore};
use sovereign_core::{Event, Feedback, NoFeedback, Session, ValidationError};

use crate::platform::{BellFeedback, InhibitWakeLock};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open today's session with the platform collaborators wired in.
pub fn open_session(config: &Config) -> Result<Session, Box<dyn std::error::Error>> {
    let feedback: Arc<dyn Feedback> = if config.feedback.enabled {
        Arc::new(BellFeedback)
    } else {
        Arc::new(NoFeedback)
    };
    let session = Session::builder()
        .feedback(feedback)
        .wake_lock(Arc::new(InhibitWakeLock::default()))
        .persist_debounce_ms(config.tracker.persist_debounce_ms)
        .open(StatsStore::open()?)?;
    Ok(session)
}

/// Look up an exercise, failing with a readable error.
pub fn resolve(id: &str, warmup: bool) -> Result<&'static Exercise, ValidationError> {
    let section = Section::from_warmup_flag(warmup);
    catalog::find(section, id).ok_or_else(|| ValidationError::UnknownExercise {
        id: id.to_string(),
        section: section.to_string(),
    })
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// One event per line, for streaming output.
pub fn print_events(events: &[Event]) -> CmdResult {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}
