//! Quick tools. Nothing here reads or writes the day's record.

use std::time::Duration;

use clap::Subcommand;
use serde::Serialize;
use sovereign_core::clock::{Clock, SystemClock};
use sovereign_core::{format, Stopwatch, TapCounter};

use super::{print_json, shutdown_signal, CmdResult};

#[derive(Subcommand)]
pub enum ToolsAction {
    /// Run a stopwatch until Ctrl-C or the limit
    Stopwatch {
        /// Stop after this many seconds
        #[arg(long = "for", value_name = "SECS")]
        limit_secs: Option<u64>,
    },
    /// Count taps and print the total
    Tap {
        count: u32,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StopwatchView {
    elapsed_ms: u64,
    elapsed: String,
}

pub fn run(action: ToolsAction) -> CmdResult {
    match action {
        ToolsAction::Stopwatch { limit_secs } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(stopwatch(limit_secs))
        }
        ToolsAction::Tap { count } => {
            let mut counter = TapCounter::default();
            for _ in 0..count {
                counter.tap();
            }
            print_json(&serde_json::json!({ "count": counter.count() }))
        }
    }
}

async fn stopwatch(limit_secs: Option<u64>) -> CmdResult {
    let clock = SystemClock;
    let mut sw = Stopwatch::default();
    sw.start(clock.now_ms());

    let limit = async {
        match limit_secs {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    tokio::pin!(limit);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = &mut limit => break,
            _ = ticker.tick() => {
                eprint!("\r{}", format::hms(sw.elapsed_secs(clock.now_ms())));
            }
        }
    }
    sw.pause(clock.now_ms());
    eprintln!();

    let elapsed_ms = sw.elapsed_ms(clock.now_ms());
    print_json(&StopwatchView {
        elapsed_ms,
        elapsed: format::hms(elapsed_ms / 1000),
    })
}
