//! Optional text generation. Always prints something: failures come back
//! as fallback text from the client.

use serde::Serialize;
use sovereign_core::catalog;
use sovereign_core::quotes::{QuoteClient, DEFAULT_WORKOUT};
use sovereign_core::storage::Config;
use sovereign_core::ValidationError;

use super::{print_json, CmdResult};

#[derive(Serialize)]
struct TextView<'a> {
    subject: &'a str,
    text: String,
}

fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, std::io::Error> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

pub fn quote(workout: Option<String>) -> CmdResult {
    let config = Config::load_or_default();
    let client = QuoteClient::new(config.quotes);
    let workout = workout.as_deref().unwrap_or(DEFAULT_WORKOUT);

    let text = block_on(client.motivational_quote(workout))?;
    print_json(&TextView {
        subject: workout,
        text,
    })
}

pub fn tip(id: &str) -> CmdResult {
    let (section, exercise) =
        catalog::find_any(id).ok_or_else(|| ValidationError::UnknownExercise {
            id: id.to_string(),
            section: "any".into(),
        })?;
    tracing::debug!(id, %section, "requesting exercise tip");

    let config = Config::load_or_default();
    let client = QuoteClient::new(config.quotes);
    let text = block_on(client.exercise_tip(exercise.name))?;
    print_json(&TextView {
        subject: exercise.name,
        text,
    })
}
