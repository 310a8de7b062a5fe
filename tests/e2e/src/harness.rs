//! Test Trainer Manager
//!
//! Provides isolated trainer instances for testing:
//! - SQLite-backed state in a temporary directory, cleaned up on drop
//! - Reopening against the same files to simulate a process restart

use std::path::{Path, PathBuf};

use chrono::Utc;
use kotoba_core::{SqliteKv, Trainer};
use tempfile::TempDir;

use crate::fixtures;

/// Namespace the fixture corpus persists under.
pub const NAMESPACE: &str = "lab_data_v30";

/// Manager for an isolated, durable trainer instance.
///
/// Both stores live on disk (state in `kotoba.db`, session snapshots in
/// `session.db`) so a [`TrainerHarness::reopen`] behaves exactly like a
/// process restart.
pub struct TrainerHarness {
    /// The trainer under test
    pub trainer: Trainer,
    /// Temporary directory (kept alive to prevent premature deletion)
    _temp_dir: TempDir,
    dir: PathBuf,
}

impl TrainerHarness {
    /// Create a trainer seeded with the fixture corpus in a fresh
    /// temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().to_path_buf();
        let trainer = Self::open_at(&dir);
        Self {
            trainer,
            _temp_dir: temp_dir,
            dir,
        }
    }

    /// Open a trainer against the databases in `dir`.
    pub fn open_at(dir: &Path) -> Trainer {
        let persistent =
            Box::new(SqliteKv::open(dir.join("kotoba.db")).expect("Failed to open state db"));
        let ephemeral =
            Box::new(SqliteKv::open(dir.join("session.db")).expect("Failed to open session db"));
        Trainer::open(
            persistent,
            ephemeral,
            NAMESPACE,
            Some(fixtures::WORDS_CSV),
            Utc::now(),
        )
        .expect("Failed to open trainer")
    }

    /// Drop the live trainer and reopen from the same files, as a
    /// process restart would.
    pub fn reopen(&mut self) {
        self.trainer = Self::open_at(&self.dir);
    }

    /// Directory holding the database files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for TrainerHarness {
    fn default() -> Self {
        Self::new()
    }
}
