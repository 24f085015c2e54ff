use serde::Serialize;
use sovereign_core::storage::Config;
use sovereign_core::Event;

use super::{open_session, print_json, CmdResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RestView<'a> {
    is_rest_day: bool,
    events: &'a [Event],
}

pub fn run() -> CmdResult {
    let config = Config::load_or_default();
    let mut session = open_session(&config)?;

    let events = session.toggle_rest_day()?;
    print_json(&RestView {
        is_rest_day: session.today().is_rest_day,
        events: &events,
    })?;

    session.flush()?;
    Ok(())
}
