//! Persistence bridge between [`UserStats`] and the kv store.
//!
//! The whole aggregate is one JSON document under [`STORAGE_KEY`]. Writes
//! overwrite it wholesale. There is no version field inside the document:
//! an incompatible shape gets a new key name.

use crate::error::Result;
use crate::model::UserStats;
use crate::storage::Database;
use crate::tracker::FocusSession;

pub const STORAGE_KEY: &str = "sovereign_soul_user_data_v13";

/// Keys used by earlier revisions, newest first.
pub const LEGACY_STORAGE_KEYS: &[&str] = &[
    "sovereign_soul_user_data_v12",
    "sovereign_soul_user_data_v11",
    "sovereign_soul_user_data_v10",
];

/// Focus countdown, kept outside the per-day record.
pub const FOCUS_KEY: &str = "sovereign_soul_focus_v1";

pub struct StatsStore {
    db: Database,
}

impl StatsStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the store in the default data directory.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open() -> Result<Self> {
        Ok(Self::new(Database::open()?))
    }

    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self> {
        Ok(Self::new(Database::open_memory()?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Load the aggregate.
    ///
    /// Absent → default. Malformed → logged, default. When the current key
    /// is absent the newest parseable legacy document is adopted and copied
    /// forward under the current key.
    ///
    /// # Errors
    /// Returns an error only when the database itself fails.
    pub fn load(&self) -> Result<UserStats> {
        if let Some(raw) = self.db.kv_get(STORAGE_KEY)? {
            return Ok(parse_stats(STORAGE_KEY, &raw).unwrap_or_default());
        }

        for key in LEGACY_STORAGE_KEYS {
            let Some(raw) = self.db.kv_get(key)? else {
                continue;
            };
            if let Some(stats) = parse_stats(key, &raw) {
                tracing::info!(
                    from = key,
                    to = STORAGE_KEY,
                    days = stats.history.len(),
                    "migrating history from legacy storage key"
                );
                self.save(&stats)?;
                return Ok(stats);
            }
        }

        Ok(UserStats::default())
    }

    /// Overwrite the stored aggregate.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, stats: &UserStats) -> Result<()> {
        let json = serde_json::to_string(stats)?;
        self.db.kv_set(STORAGE_KEY, &json)?;
        tracing::debug!(days = stats.history.len(), "user stats saved");
        Ok(())
    }

    /// # Errors
    /// Returns an error only when the database itself fails.
    pub fn load_focus(&self) -> Result<Option<FocusSession>> {
        let Some(raw) = self.db.kv_get(FOCUS_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed focus session");
                Ok(None)
            }
        }
    }

    /// Store or clear the focus session.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save_focus(&self, focus: Option<&FocusSession>) -> Result<()> {
        match focus {
            Some(session) => self.db.kv_set(FOCUS_KEY, &serde_json::to_string(session)?)?,
            None => {
                self.db.kv_remove(FOCUS_KEY)?;
            }
        }
        Ok(())
    }

    /// Erase every key this store has ever written.
    ///
    /// # Errors
    /// Returns an error if a delete fails.
    pub fn wipe(&self) -> Result<()> {
        for key in std::iter::once(&STORAGE_KEY)
            .chain(LEGACY_STORAGE_KEYS)
            .chain(std::iter::once(&FOCUS_KEY))
        {
            self.db.kv_remove(key)?;
        }
        tracing::info!("all stored data wiped");
        Ok(())
    }
}

fn parse_stats(key: &str, raw: &str) -> Option<UserStats> {
    match serde_json::from_str(raw) {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored user stats are malformed, treating as absent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Section;
    use crate::tracker::{apply_progress_update, fresh_day, ChallengeMode};
    use chrono::NaiveDate;

    fn sample_stats() -> UserStats {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let mut stats = UserStats::default();
        stats.upsert_day(apply_progress_update(&fresh_day(date), "squats", 55, Section::Main));
        stats
    }

    #[test]
    fn empty_store_loads_default() {
        let store = StatsStore::open_memory().unwrap();
        assert_eq!(store.load().unwrap(), UserStats::default());
    }

    #[test]
    fn save_then_load() {
        let store = StatsStore::open_memory().unwrap();
        let stats = sample_stats();
        store.save(&stats).unwrap();
        assert_eq!(store.load().unwrap(), stats);
    }

    #[test]
    fn malformed_document_falls_back_to_default() {
        let store = StatsStore::open_memory().unwrap();
        store.database().kv_set(STORAGE_KEY, "{not json").unwrap();
        let stats = store.load().unwrap();
        assert!(stats.history.is_empty());
        assert_eq!(stats, UserStats::default());
    }

    #[test]
    fn legacy_key_is_migrated_forward() {
        let store = StatsStore::open_memory().unwrap();
        let stats = sample_stats();
        let legacy = "sovereign_soul_user_data_v10";
        store
            .database()
            .kv_set(legacy, &serde_json::to_string(&stats).unwrap())
            .unwrap();

        assert_eq!(store.load().unwrap(), stats);
        assert!(store.database().kv_get(STORAGE_KEY).unwrap().is_some());
        // The old entry is left in place.
        assert!(store.database().kv_get(legacy).unwrap().is_some());
    }

    #[test]
    fn newest_parseable_legacy_key_wins() {
        let store = StatsStore::open_memory().unwrap();
        let stats = sample_stats();
        store
            .database()
            .kv_set("sovereign_soul_user_data_v12", "garbage")
            .unwrap();
        store
            .database()
            .kv_set("sovereign_soul_user_data_v11", &serde_json::to_string(&stats).unwrap())
            .unwrap();
        store
            .database()
            .kv_set(
                "sovereign_soul_user_data_v10",
                &serde_json::to_string(&UserStats::default()).unwrap(),
            )
            .unwrap();

        assert_eq!(store.load().unwrap(), stats);
    }

    #[test]
    fn focus_roundtrip_and_clear() {
        let store = StatsStore::open_memory().unwrap();
        assert!(store.load_focus().unwrap().is_none());
        let session = FocusSession::start(ChallengeMode::TwoHour, 1_000).unwrap();
        store.save_focus(Some(&session)).unwrap();
        assert_eq!(store.load_focus().unwrap(), Some(session));
        store.save_focus(None).unwrap();
        assert!(store.load_focus().unwrap().is_none());
    }

    #[test]
    fn wipe_removes_current_legacy_and_focus_keys() {
        let store = StatsStore::open_memory().unwrap();
        store.save(&sample_stats()).unwrap();
        store
            .database()
            .kv_set("sovereign_soul_user_data_v10", "{}")
            .unwrap();
        store
            .save_focus(Some(&FocusSession::start(ChallengeMode::OneHour, 0).unwrap()))
            .unwrap();

        store.wipe().unwrap();
        assert_eq!(store.load().unwrap(), UserStats::default());
        assert!(store.load_focus().unwrap().is_none());
        assert!(store
            .database()
            .kv_get("sovereign_soul_user_data_v10")
            .unwrap()
            .is_none());
    }
}
