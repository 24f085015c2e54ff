//! Focus challenge commands.

use clap::Subcommand;
use serde::Serialize;
use sovereign_core::storage::Config;
use sovereign_core::{format, ChallengeMode, Event};

use super::{open_session, print_json, CmdResult};

#[derive(Subcommand)]
pub enum FocusAction {
    /// Start a countdown ("two-hour" or "one-hour")
    Start {
        mode: ChallengeMode,
    },
    /// Leave focus mode
    Stop,
    /// Show the countdown
    Status,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FocusView<'a> {
    active: bool,
    mode: Option<ChallengeMode>,
    remaining_secs: Option<u64>,
    remaining: Option<String>,
    events: &'a [Event],
}

pub fn run(action: FocusAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut session = open_session(&config)?;

    let mut events = match action {
        FocusAction::Start { mode } => session.start_focus(mode)?,
        FocusAction::Stop => session.stop_focus()?,
        FocusAction::Status => Vec::new(),
    };
    // Picks up a countdown that ran out since the last invocation.
    events.extend(session.poll()?);

    let remaining_secs = session.focus_remaining_secs();
    print_json(&FocusView {
        active: remaining_secs.is_some(),
        mode: session.mode().focus().map(|f| f.mode),
        remaining_secs,
        remaining: remaining_secs.map(format::hms),
        events: &events,
    })?;

    session.flush()?;
    Ok(())
}
