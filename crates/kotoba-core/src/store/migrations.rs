//! Item Collection Migrations
//!
//! Persisted item collections carry a version envelope:
//! `{"version": 2, "items": [...]}`. The oldest format (v1) is a bare
//! JSON array written before the envelope existed; its items may hold
//! out-of-range levels and a since-removed `interval` field. Decoding
//! always upgrades to the current version, so a collection written today
//! is always current.

use serde::Deserialize;

use crate::vocab::{ItemStats, VocabItem, MAX_LEVEL};

use super::{Result, StoreError};

/// Current item collection schema version.
pub const ITEMS_SCHEMA_VERSION: u32 = 2;

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    items: Vec<VocabItem>,
}

/// V1 item shape: unbounded levels plus a per-item `interval` that the
/// lookup-table scheduler made redundant.
#[derive(Deserialize)]
struct LegacyItem {
    id: i64,
    #[serde(default)]
    en: String,
    #[serde(default)]
    ja: String,
    #[serde(default)]
    pos: String,
    #[serde(default)]
    ex: String,
    #[serde(default, rename = "exJa")]
    ex_ja: String,
    #[serde(default)]
    stats: LegacyStats,
}

#[derive(Default, Deserialize)]
struct LegacyStats {
    #[serde(default)]
    level: u32,
    #[serde(default, rename = "nextReview")]
    next_review: i64,
    // Present in v1 payloads; dropped on upgrade.
    #[serde(default, rename = "interval")]
    _interval: i64,
}

fn migrate_v1(legacy: Vec<LegacyItem>) -> Vec<VocabItem> {
    legacy
        .into_iter()
        .map(|old| {
            let mut item = VocabItem::new(old.id, old.en, old.ja);
            item.pos = old.pos;
            item.ex = old.ex;
            item.ex_ja = old.ex_ja;
            item.stats = ItemStats {
                level: old.stats.level.min(MAX_LEVEL as u32) as u8,
                next_review: old.stats.next_review,
            };
            item
        })
        .collect()
}

/// Decode a persisted item collection, upgrading old formats in place.
pub fn decode_items(raw: &str) -> Result<Vec<VocabItem>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    if value.is_array() {
        let legacy: Vec<LegacyItem> = serde_json::from_value(value)?;
        tracing::info!(items = legacy.len(), "migrating v1 item collection");
        return Ok(migrate_v1(legacy));
    }

    let envelope: Envelope = serde_json::from_value(value)?;
    match envelope.version {
        ITEMS_SCHEMA_VERSION => Ok(envelope.items),
        other => Err(StoreError::Corrupt(format!(
            "unsupported item collection version: {}",
            other
        ))),
    }
}

/// Encode an item collection in the current envelope format.
pub fn encode_items(items: &[VocabItem]) -> Result<String> {
    let envelope = serde_json::json!({
        "version": ITEMS_SCHEMA_VERSION,
        "items": items,
    });
    Ok(serde_json::to_string(&envelope)?)
}

// ============================================================================
// TESTS
// ============================================================================
