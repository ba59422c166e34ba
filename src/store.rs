//! Transaction batcher: persists staged bars and symbol registrations
//! into SQLite under a configurable commit policy.
//!
//! The commit policy is the pipeline's one durability-vs-throughput
//! lever. Price bars are upserted (`INSERT OR REPLACE` keyed on
//! symbol+date) so re-ingesting a file is idempotent; symbols are
//! registered with `INSERT OR IGNORE` so the first sighting wins.

use crate::error::ImportError;
use crate::ingestor::StagedFile;
use crate::sqlite_pragma::PragmaProfile;
use crate::types::{Exchange, PriceBar};
use rusqlite::{params, Connection};
use std::path::Path;

/// How staged writes are grouped into atomic, durable transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPolicy {
    /// One explicit transaction per source file. A mid-run crash loses
    /// at most one file's writes.
    PerFile,
    /// One explicit transaction spanning `files_per_commit` files.
    /// Highest throughput, largest at-risk window on crash.
    Periodic { files_per_commit: usize },
    /// Explicit commit after every single record. Slowest, smallest
    /// at-risk window.
    PerRecord,
    /// No explicit transactions; every statement autocommits.
    Autocommit,
}

impl std::fmt::Display for CommitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitPolicy::PerFile => write!(f, "per-file"),
            CommitPolicy::Periodic { files_per_commit } => {
                write!(f, "periodic (commit every {} files)", files_per_commit)
            }
            CommitPolicy::PerRecord => write!(f, "per-record"),
            CommitPolicy::Autocommit => write!(f, "autocommit"),
        }
    }
}

/// Write-side outcome for one file. `rejected` counts store-level
/// write failures, not parse rejections.
#[derive(Debug, Default)]
pub struct FileOutcome {
    pub written: u64,
    pub rejected: u64,
}

pub struct SqliteStore {
    conn: Connection,
    policy: CommitPolicy,
    files_since_commit: usize,
    batch_open: bool,
}

impl SqliteStore {
    /// Open the store. The database file must already exist with its
    /// schema in place; a missing file is a fatal precondition, never
    /// an implicit create.
    pub fn open(
        db_path: &Path,
        policy: CommitPolicy,
        profile: PragmaProfile,
    ) -> Result<Self, ImportError> {
        if !db_path.exists() {
            return Err(ImportError::Precondition(format!(
                "Database not found: {}",
                db_path.display()
            )));
        }

        let conn = Connection::open(db_path)?;
        profile.apply(&conn)?;

        Ok(Self {
            conn,
            policy,
            files_since_commit: 0,
            batch_open: false,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Persist one staged file under the configured commit policy,
    /// then register its symbol.
    ///
    /// A per-record write failure is logged, counted and skipped; the
    /// surrounding transaction keeps going. Symbol registration is
    /// issued outside the file's record transaction, so a partially
    /// failed file still registers its symbol.
    pub fn persist_file(&mut self, staged: &StagedFile) -> FileOutcome {
        let mut outcome = FileOutcome::default();

        match self.policy {
            CommitPolicy::PerFile => {
                self.begin();
                for bar in &staged.bars {
                    self.write_bar(bar, &mut outcome);
                }
                self.commit();
            }
            CommitPolicy::Periodic { .. } => {
                if !self.batch_open {
                    self.begin();
                    self.batch_open = true;
                }
                for bar in &staged.bars {
                    self.write_bar(bar, &mut outcome);
                }
            }
            CommitPolicy::PerRecord => {
                for bar in &staged.bars {
                    self.begin();
                    self.write_bar(bar, &mut outcome);
                    self.commit();
                }
            }
            CommitPolicy::Autocommit => {
                for bar in &staged.bars {
                    self.write_bar(bar, &mut outcome);
                }
            }
        }

        self.register_symbol(&staged.symbol, staged.exchange);

        if let CommitPolicy::Periodic { files_per_commit } = self.policy {
            self.files_since_commit += 1;
            if self.files_since_commit >= files_per_commit {
                self.commit();
                self.batch_open = false;
                self.files_since_commit = 0;
            }
        }

        outcome
    }

    /// Commit any open periodic batch. Called at exchange-root
    /// boundaries and at the end of the run; a no-op for the other
    /// policies.
    pub fn flush(&mut self) {
        if self.batch_open {
            self.commit();
            self.batch_open = false;
            self.files_since_commit = 0;
        }
    }

    fn write_bar(&self, bar: &PriceBar, outcome: &mut FileOutcome) {
        let result = self.conn.execute(
            "INSERT OR REPLACE INTO historical_prices \
             (symbol, date, open, high, low, close, volume) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                bar.symbol,
                bar.date,
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume
            ],
        );

        match result {
            Ok(_) => outcome.written += 1,
            Err(e) => {
                outcome.rejected += 1;
                log::warn!("⚠️  Failed to write {} {}: {}", bar.symbol, bar.date, e);
            }
        }
    }

    fn register_symbol(&self, symbol: &str, exchange: Exchange) {
        // Display name defaults to the symbol itself; first sighting wins
        let result = self.conn.execute(
            "INSERT OR IGNORE INTO symbols (symbol, name, exchange) VALUES (?1, ?1, ?2)",
            params![symbol, exchange.as_str()],
        );

        if let Err(e) = result {
            log::warn!("⚠️  Failed to register symbol {}: {}", symbol, e);
        }
    }

    fn begin(&self) {
        if let Err(e) = self.conn.execute_batch("BEGIN") {
            log::error!("⚠️  Failed to begin transaction: {}", e);
        }
    }

    /// Commit the open transaction. A commit failure triggers a
    /// best-effort rollback; neither failure aborts the run, and data
    /// committed before the failed boundary stays durable.
    fn commit(&self) {
        if let Err(e) = self.conn.execute_batch("COMMIT") {
            log::error!("⚠️  Commit failed: {}", e);
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                log::error!("⚠️  Rollback failed: {}", e);
            }
        }
    }
}
