//! Run coordinator: drives the walker, ingestor and store across all
//! configured exchange roots, then refreshes freshness.

use crate::config::{ImportConfig, EXCHANGE_ROOTS};
use crate::error::ImportError;
use crate::freshness::refresh_freshness;
use crate::ingestor::stage_file;
use crate::store::SqliteStore;
use crate::types::{Exchange, IngestionTally, RunSummary};
use crate::walker::collect_data_files;
use std::path::Path;
use std::time::Instant;

/// Execute a full import run.
///
/// The only fatal preconditions are a missing data directory and a
/// missing database file, both checked before any write. Everything
/// after that is recovered at line, file, subtree or batch
/// granularity and the run always proceeds to the final summary.
pub fn run_import(config: &ImportConfig) -> Result<RunSummary, ImportError> {
    if !config.data_dir.exists() {
        return Err(ImportError::Precondition(format!(
            "Data directory not found: {}",
            config.data_dir.display()
        )));
    }

    let mut store = SqliteStore::open(&config.db_path, config.commit_policy, config.pragma_profile)?;
    log::info!("✅ Connected to database: {}", config.db_path.display());

    let started = Instant::now();
    let mut grand_total = IngestionTally::default();

    for &(dir_label, exchange) in EXCHANGE_ROOTS {
        let root = config.data_dir.join(dir_label);
        if !root.exists() {
            continue;
        }

        log::info!("📊 Processing {} ({})...", dir_label, exchange);
        let tally = ingest_root(&root, exchange, &mut store);
        log::info!(
            "✅ {}: {} records, {} rejected",
            dir_label,
            tally.records_written,
            tally.records_rejected
        );

        grand_total.absorb(tally);

        // Close out any pending periodic batch so a later root's
        // failure can't take this root's writes with it.
        store.flush();
    }

    log::info!("🔄 Updating data freshness...");
    let symbols_refreshed = match refresh_freshness(store.connection()) {
        Ok(count) => {
            log::info!("💾 Freshness updated for {} symbols", count);
            count
        }
        Err(e) => {
            log::error!("❌ Error updating data freshness: {}", e);
            0
        }
    };

    let elapsed_secs = started.elapsed().as_secs_f64();
    let records_per_sec = if elapsed_secs > 0.0 {
        grand_total.records_written as f64 / elapsed_secs
    } else {
        0.0
    };

    Ok(RunSummary {
        files_seen: grand_total.files_seen,
        records_written: grand_total.records_written,
        records_rejected: grand_total.records_rejected,
        symbols_refreshed,
        elapsed_secs,
        records_per_sec,
    })
}

fn ingest_root(root: &Path, exchange: Exchange, store: &mut SqliteStore) -> IngestionTally {
    let mut tally = IngestionTally::default();

    for source in collect_data_files(root, exchange) {
        let staged = stage_file(&source);
        let outcome = store.persist_file(&staged);

        tally.files_seen += 1;
        tally.records_written += outcome.written;
        tally.records_rejected += staged.rejected + outcome.rejected;

        if tally.files_seen % 100 == 0 {
            log::info!(
                "📁 Processed {} files, {} records so far...",
                tally.files_seen,
                tally.records_written
            );
        }
    }

    tally
}
