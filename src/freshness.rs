//! Per-symbol freshness recompute.
//!
//! Runs after a full ingestion pass: every symbol with at least one
//! price bar gets its `data_freshness` row fully replaced. Symbols
//! whose bars were deleted outside the pipeline keep their old row;
//! this summarizer never marks anything stale.

use crate::error::ImportError;
use chrono::Utc;
use rusqlite::{params, Connection};

/// Recompute coverage for every symbol present in `historical_prices`
/// and upsert one freshness row per symbol (status `active`,
/// error_count 0, last_updated = now). Returns the number of symbols
/// refreshed.
pub fn refresh_freshness(conn: &Connection) -> Result<usize, ImportError> {
    let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let mut stmt = conn.prepare(
        "SELECT symbol, COUNT(*), MIN(date), MAX(date) \
         FROM historical_prices GROUP BY symbol",
    )?;
    let coverage: Vec<(String, i64, String, String)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .filter_map(|row| row.ok())
        .collect();
    drop(stmt);

    conn.execute_batch("BEGIN")?;
    for (symbol, count, earliest, latest) in &coverage {
        log::debug!("   {}: {} bars, {} .. {}", symbol, count, earliest, latest);
        let result = conn.execute(
            "INSERT OR REPLACE INTO data_freshness \
             (symbol, last_updated, status, error_count) \
             VALUES (?1, ?2, 'active', 0)",
            params![symbol, now],
        );
        if let Err(e) = result {
            log::warn!("⚠️  Failed to refresh freshness for {}: {}", symbol, e);
        }
    }
    if let Err(e) = conn.execute_batch("COMMIT") {
        if let Err(e) = conn.execute_batch("ROLLBACK") {
            log::error!("⚠️  Rollback failed: {}", e);
        }
        return Err(e.into());
    }

    Ok(coverage.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_db(path: &std::path::Path) -> Connection {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE historical_prices (
                symbol TEXT NOT NULL,
                date   TEXT NOT NULL,
                open REAL, high REAL, low REAL, close REAL, volume REAL,
                PRIMARY KEY (symbol, date)
            );
            CREATE TABLE data_freshness (
                symbol       TEXT PRIMARY KEY,
                last_updated TEXT,
                status       TEXT,
                error_count  INTEGER
            );",
        )
        .unwrap();
        conn
    }

    fn insert_bar(conn: &Connection, symbol: &str, date: &str) {
        conn.execute(
            "INSERT INTO historical_prices (symbol, date, open, high, low, close, volume) \
             VALUES (?1, ?2, 1, 2, 0.5, 1.5, 100)",
            params![symbol, date],
        )
        .unwrap();
    }

    #[test]
    fn test_one_row_per_symbol() {
        let dir = tempdir().unwrap();
        let conn = create_test_db(&dir.path().join("test.db"));

        insert_bar(&conn, "AAPL", "2023-01-03");
        insert_bar(&conn, "AAPL", "2023-01-04");
        insert_bar(&conn, "MSFT", "2023-01-03");

        let refreshed = refresh_freshness(&conn).unwrap();
        assert_eq!(refreshed, 2);

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM data_freshness", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 2);

        let (last_updated, status, error_count): (String, String, i64) = conn
            .query_row(
                "SELECT last_updated, status, error_count FROM data_freshness \
                 WHERE symbol = 'AAPL'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();

        assert!(!last_updated.is_empty());
        assert_eq!(status, "active");
        assert_eq!(error_count, 0);
    }

    #[test]
    fn test_rerun_replaces_not_duplicates() {
        let dir = tempdir().unwrap();
        let conn = create_test_db(&dir.path().join("test.db"));

        insert_bar(&conn, "AAPL", "2023-01-03");

        refresh_freshness(&conn).unwrap();
        refresh_freshness(&conn).unwrap();

        let rows: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM data_freshness WHERE symbol = 'AAPL'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_symbol_without_bars_untouched() {
        let dir = tempdir().unwrap();
        let conn = create_test_db(&dir.path().join("test.db"));

        // Pre-existing freshness row for a symbol with no bars left
        conn.execute(
            "INSERT INTO data_freshness (symbol, last_updated, status, error_count) \
             VALUES ('GONE', '2020-01-01 00:00:00', 'active', 0)",
            [],
        )
        .unwrap();
        insert_bar(&conn, "AAPL", "2023-01-03");

        let refreshed = refresh_freshness(&conn).unwrap();
        assert_eq!(refreshed, 1);

        // The stale row is left exactly as it was
        let last_updated: String = conn
            .query_row(
                "SELECT last_updated FROM data_freshness WHERE symbol = 'GONE'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(last_updated, "2020-01-01 00:00:00");
    }
}
