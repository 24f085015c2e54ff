//! Live exercise timer.
//!
//! Samples the session on a tokio interval and streams events as JSON
//! lines. Stops on Ctrl-C or SIGTERM, on `--for`, or when the session stops the timer
//! itself (completion, warm-up target).

use std::time::Duration;

use clap::Args;
use sovereign_core::catalog::{Exercise, Section};
use sovereign_core::storage::Config;
use tokio::time::{Instant, MissedTickBehavior};

use super::{open_session, print_events, resolve, shutdown_signal, CmdResult};

#[derive(Args)]
pub struct TimerArgs {
    /// Exercise ID (e.g. "plank")
    id: String,
    #[arg(long)]
    warmup: bool,
    /// Pause after this many seconds
    #[arg(long = "for", value_name = "SECS")]
    limit_secs: Option<u64>,
}

pub fn run(args: TimerArgs) -> CmdResult {
    let exercise = resolve(&args.id, args.warmup)?;
    if !exercise.is_timer() {
        return Err(format!("'{}' is counted, not timed", args.id).into());
    }
    let section = Section::from_warmup_flag(args.warmup);
    let config = Config::load_or_default();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_loop(exercise, section, &config, args.limit_secs))
}

async fn run_loop(
    exercise: &'static Exercise,
    section: Section,
    config: &Config,
    limit_secs: Option<u64>,
) -> CmdResult {
    let mut session = open_session(config)?;
    print_events(&session.start_timer(exercise.id, section))?;
    if !session.is_timer_running(exercise.id, section) {
        session.flush()?;
        return Err(format!(
            "timer for '{}' did not start (rest day or warm-up already done)",
            exercise.id
        )
        .into());
    }

    let poll_every = Duration::from_millis(config.tracker.poll_interval_ms.max(10));
    let mut interval = tokio::time::interval(poll_every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let deadline = limit_secs.map(|secs| Instant::now() + Duration::from_secs(secs));

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::debug!("interrupted");
                print_events(&session.poll()?)?;
                print_events(&session.pause_timer(exercise.id, section))?;
                break;
            }
            _ = interval.tick() => {
                print_events(&session.poll()?)?;
                if !session.is_timer_running(exercise.id, section) {
                    break;
                }
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    print_events(&session.pause_timer(exercise.id, section))?;
                    break;
                }
            }
        }
    }

    print_events(&session.flush()?)?;
    Ok(())
}
