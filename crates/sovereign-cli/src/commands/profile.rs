use clap::Subcommand;
use sovereign_core::storage::Config;
use sovereign_core::UserProfile;

use super::{open_session, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the profile
    Show,
    /// Change profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        gender: Option<String>,
    },
}

pub fn run(action: ProfileAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut session = open_session(&config)?;
    let current = session.stats().profile.clone().unwrap_or_default();

    match action {
        ProfileAction::Show => {
            print_json(&current)?;
            session.shutdown();
        }
        ProfileAction::Set { name, age, gender } => {
            let profile = UserProfile {
                name: name.unwrap_or(current.name),
                age: age.unwrap_or(current.age),
                gender: gender.unwrap_or(current.gender),
            };
            session.update_profile(profile.clone());
            session.flush()?;
            print_json(&profile)?;
        }
    }
    Ok(())
}
