mod config;
pub mod database;
mod debounce;
pub mod stats_store;

pub use config::{Config, FeedbackConfig, QuoteConfig, TrackerConfig};
pub use database::Database;
pub use debounce::{DebouncedWrite, PendingWrite};
pub use stats_store::{StatsStore, FOCUS_KEY, LEGACY_STORAGE_KEYS, STORAGE_KEY};

use std::path::PathBuf;

/// Returns the data directory.
///
/// `SOVEREIGN_DATA_DIR` wins when set; otherwise `~/.config/sovereign-soul`,
/// or `~/.config/sovereign-soul-dev` with `SOVEREIGN_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("SOVEREIGN_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SOVEREIGN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("sovereign-soul-dev")
            } else {
                base_dir.join("sovereign-soul")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
