//! Corpus module - CSV ingestion and dataset manifest resolution
//!
//! Corpus files are RFC4180 CSV (quoted fields, doubled-quote escaping)
//! with a header row that is always skipped. Malformed or short rows
//! are skipped individually; ingestion never fails wholesale on a bad
//! row. The dataset manifest is a second CSV listing
//! `(filename, description)` pairs, each mapped to a derived storage
//! namespace with explicit overrides for the two legacy dataset names.

use serde::{Deserialize, Serialize};

use crate::vocab::VocabItem;

/// Storage namespaces for datasets that predate derived keys. Their
/// persisted item collections must keep loading under the old keys.
const LEGACY_NAMESPACES: [(&str, &str); 2] = [
    ("words.csv", "lab_data_v30"),
    ("phrases.csv", "lab_phrase_data_v30"),
];

/// Corpus error
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// The manifest lists no datasets at all; a fatal configuration
    /// error, never silently swallowed
    #[error("no datasets available")]
    NoDatasets,
    /// CSV-level failure (encoding, IO through the reader)
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

// ============================================================================
// DATASET MANIFEST
// ============================================================================

/// One manifest row: a corpus file plus its storage namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Corpus file name as listed in the manifest
    pub file: String,
    /// Human-readable description
    pub description: String,
    /// Key under which the item collection persists
    pub namespace: String,
}

/// Derive the storage namespace for a dataset file name.
pub fn namespace_for(file: &str) -> String {
    for (legacy_file, namespace) in LEGACY_NAMESPACES {
        if file == legacy_file {
            return namespace.to_string();
        }
    }
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    let sanitized: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("vocab_data_{}", sanitized)
}

/// Parse the dataset manifest: `(filename, description)` rows, no
/// header. Short or empty rows are skipped.
pub fn parse_manifest(text: &str) -> Result<Vec<Dataset>, CorpusError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut datasets = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("skipping malformed manifest row: {}", e);
                continue;
            }
        };
        let file = record.get(0).unwrap_or("").trim();
        if file.is_empty() {
            continue;
        }
        let description = record.get(1).unwrap_or("").trim().to_string();
        datasets.push(Dataset {
            file: file.to_string(),
            description,
            namespace: namespace_for(file),
        });
    }
    Ok(datasets)
}

/// Resolve the active dataset. An unknown or missing selection falls
/// back to the first listed dataset; an empty manifest is fatal.
pub fn resolve<'a>(datasets: &'a [Dataset], selected: Option<&str>) -> Result<&'a Dataset, CorpusError> {
    if datasets.is_empty() {
        return Err(CorpusError::NoDatasets);
    }
    if let Some(name) = selected {
        if let Some(dataset) = datasets.iter().find(|d| d.file == name) {
            return Ok(dataset);
        }
        tracing::warn!(selected = name, "unknown dataset selection, falling back to first");
    }
    Ok(&datasets[0])
}

// ============================================================================
// CORPUS INGESTION
// ============================================================================

/// Parse a corpus CSV into unlearned vocabulary items.
///
/// Expected columns: `id, en, ja, pos, example, exampleTranslation`,
/// optionally extended with `pronunciation, synonyms, antonyms,
/// frequencyBand`. A leading column that does not parse as a positive
/// integer makes the row's 1-based ordinal the identifier.
pub fn parse_corpus(text: &str) -> Result<Vec<VocabItem>, CorpusError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut items = Vec::new();
    let mut skipped = 0usize;

    for (ordinal, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(row = ordinal + 1, "skipping malformed corpus row: {}", e);
                skipped += 1;
                continue;
            }
        };

        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        let en = field(1);
        let ja = field(2);
        if en.is_empty() || ja.is_empty() {
            skipped += 1;
            continue;
        }

        let id = record
            .get(0)
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|&id| id > 0)
            .unwrap_or(ordinal as i64 + 1);

        let mut item = VocabItem::new(id, en, ja);
        // Datasets occasionally pack alternatives as "noun/verb"; only
        // the first reading is kept.
        item.pos = field(3).split('/').next().unwrap_or_default().to_string();
        item.ex = field(4);
        item.ex_ja = field(5);
        item.pronunciation = field(6);
        item.synonyms = field(7);
        item.antonyms = field(8);
        item.frequency_band = field(9);
        items.push(item);
    }

    tracing::info!(loaded = items.len(), skipped, "corpus parsed");
    Ok(items)
}

// ============================================================================
// TESTS
// ============================================================================
