//! Store module - Persistence layer
//!
//! Everything durable lives in a key-value store ([`KvStore`]) as JSON
//! strings. Item collections get a version envelope (see
//! [`migrations`]); the remaining state blobs (preferences, history,
//! affinity, daily counter, session snapshot) are plain serde values
//! under well-known keys.

pub mod kv;
pub mod migrations;

pub use kv::{KvStore, MemoryKv, SqliteKv};
pub use migrations::{decode_items, encode_items, ITEMS_SCHEMA_VERSION};

use serde::{de::DeserializeOwned, Serialize};

use crate::affinity::AffinityState;
use crate::history::{DailyCounter, HistoryLog};
use crate::queue::SessionConfig;
use crate::session::Session;
use crate::vocab::{level_distribution, VocabItem, LEVEL_BUCKETS};

// ============================================================================
// KEYS
// ============================================================================

/// Daily history log.
pub const KEY_HISTORY: &str = "history_v1";
/// Affinity (engagement points) state.
pub const KEY_AFFINITY: &str = "affinity_v1";
/// Answers-per-day counter.
pub const KEY_DAILY: &str = "daily_count_v1";
/// User preferences (a [`SessionConfig`] blob).
pub const KEY_PREFS: &str = "prefs_v1";
/// In-progress session snapshot (ephemeral store).
pub const KEY_SESSION: &str = "session_current";
/// Config of the most recently started session (ephemeral store).
pub const KEY_LAST_CONFIG: &str = "session_last_config";

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Serialization error
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// No session snapshot to resume
    #[error("no session snapshot to resume")]
    MissingSession,
    /// Persisted data failed structural validation
    #[error("corrupt persisted data: {0}")]
    Corrupt(String),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StoreError>;

// ============================================================================
// ITEM STORE
// ============================================================================

/// The live item collection for one dataset, paired with the namespace
/// it persists under.
#[derive(Debug, Clone)]
pub struct ItemStore {
    namespace: String,
    items: Vec<VocabItem>,
}

impl ItemStore {
    /// Load the collection persisted under `namespace`, upgrading old
    /// formats. `Ok(None)` means nothing was ever persisted there.
    pub fn load(kv: &dyn KvStore, namespace: &str) -> Result<Option<Self>> {
        let Some(raw) = kv.get(namespace)? else {
            return Ok(None);
        };
        let items = decode_items(&raw)?;
        Ok(Some(Self {
            namespace: namespace.to_string(),
            items,
        }))
    }

    /// Create a collection from freshly ingested corpus items. Not yet
    /// persisted; call [`ItemStore::save`].
    pub fn seed(namespace: impl Into<String>, items: Vec<VocabItem>) -> Self {
        Self {
            namespace: namespace.into(),
            items,
        }
    }

    /// Persist the collection in the current envelope format.
    pub fn save(&self, kv: &mut dyn KvStore) -> Result<()> {
        let encoded = encode_items(&self.items)?;
        kv.set(&self.namespace, &encoded)
    }

    /// The namespace this collection persists under.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// All items.
    pub fn items(&self) -> &[VocabItem] {
        &self.items
    }

    /// Mutable access to one item by id.
    pub fn get_mut(&mut self, id: i64) -> Option<&mut VocabItem> {
        self.items.iter_mut().find(|w| w.id == id)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Count of items per mastery level.
    pub fn level_distribution(&self) -> [u32; LEVEL_BUCKETS] {
        level_distribution(&self.items)
    }
}

// ============================================================================
// STATE BLOBS
// ============================================================================

fn load_blob<T: DeserializeOwned>(kv: &dyn KvStore, key: &str) -> Result<Option<T>> {
    match kv.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

fn save_blob<T: Serialize>(kv: &mut dyn KvStore, key: &str, value: &T) -> Result<()> {
    kv.set(key, &serde_json::to_string(value)?)
}

/// Load persisted preferences, defaulting when none exist.
pub fn load_prefs(kv: &dyn KvStore) -> Result<SessionConfig> {
    Ok(load_blob(kv, KEY_PREFS)?.unwrap_or_default())
}

/// Persist preferences.
pub fn save_prefs(kv: &mut dyn KvStore, prefs: &SessionConfig) -> Result<()> {
    save_blob(kv, KEY_PREFS, prefs)
}

/// Load the history log, defaulting to empty.
pub fn load_history(kv: &dyn KvStore) -> Result<HistoryLog> {
    Ok(load_blob(kv, KEY_HISTORY)?.unwrap_or_default())
}

/// Persist the history log.
pub fn save_history(kv: &mut dyn KvStore, history: &HistoryLog) -> Result<()> {
    save_blob(kv, KEY_HISTORY, history)
}

/// Load affinity state. `Ok(None)` means no activity was ever recorded.
pub fn load_affinity(kv: &dyn KvStore) -> Result<Option<AffinityState>> {
    load_blob(kv, KEY_AFFINITY)
}

/// Persist affinity state.
pub fn save_affinity(kv: &mut dyn KvStore, affinity: &AffinityState) -> Result<()> {
    save_blob(kv, KEY_AFFINITY, affinity)
}

/// Load the daily answer counter, defaulting to zero.
pub fn load_counter(kv: &dyn KvStore) -> Result<DailyCounter> {
    Ok(load_blob(kv, KEY_DAILY)?.unwrap_or_default())
}

/// Persist the daily answer counter.
pub fn save_counter(kv: &mut dyn KvStore, counter: &DailyCounter) -> Result<()> {
    save_blob(kv, KEY_DAILY, counter)
}

// ============================================================================
// SESSION SNAPSHOTS
// ============================================================================

/// Load the in-progress session snapshot, failing when none exists.
pub fn load_session(kv: &dyn KvStore) -> Result<Session> {
    load_blob(kv, KEY_SESSION)?.ok_or(StoreError::MissingSession)
}

/// Persist the in-progress session snapshot.
pub fn save_session(kv: &mut dyn KvStore, session: &Session) -> Result<()> {
    save_blob(kv, KEY_SESSION, session)
}

/// Drop the in-progress session snapshot, if any.
pub fn clear_session(kv: &mut dyn KvStore) -> Result<()> {
    kv.remove(KEY_SESSION)
}

/// Load the config of the most recently started session.
pub fn load_last_config(kv: &dyn KvStore) -> Result<Option<SessionConfig>> {
    load_blob(kv, KEY_LAST_CONFIG)
}

/// Persist the config of the most recently started session.
pub fn save_last_config(kv: &mut dyn KvStore, config: &SessionConfig) -> Result<()> {
    save_blob(kv, KEY_LAST_CONFIG, config)
}

// ============================================================================
// TESTS
// ============================================================================
