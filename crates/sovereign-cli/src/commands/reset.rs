use sovereign_core::storage::Config;

use super::{open_session, print_events, CmdResult};

pub fn run(yes: bool) -> CmdResult {
    if !yes {
        return Err("refusing to erase all data without --yes".into());
    }
    let config = Config::load_or_default();
    let mut session = open_session(&config)?;

    let mut events = session.reset_all()?;
    events.extend(session.flush()?);
    print_events(&events)?;
    Ok(())
}
