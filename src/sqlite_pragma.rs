//! SQLite engine tuning profiles.
//!
//! These are configuration, not pipeline logic: the same pipeline runs
//! under WAL with relaxed sync for bulk throughput, or under full-sync
//! rollback journaling when corruption resistance matters more than
//! speed.

use rusqlite::Connection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PragmaProfile {
    /// WAL journal, relaxed sync, large cache, in-memory temp store,
    /// 256MB mmap. Suited to long bulk imports with concurrent readers.
    Throughput,
    /// Rollback journal, full sync, small cache, on-disk temp store.
    Safety,
    /// No pragmas at all; whatever the engine defaults to.
    EngineDefault,
}

impl PragmaProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            PragmaProfile::Throughput => "throughput",
            PragmaProfile::Safety => "safety",
            PragmaProfile::EngineDefault => "default",
        }
    }

    pub fn apply(&self, conn: &Connection) -> Result<(), rusqlite::Error> {
        match self {
            PragmaProfile::Throughput => {
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
                conn.pragma_update(None, "cache_size", 10_000)?;
                conn.pragma_update(None, "temp_store", "MEMORY")?;
                conn.pragma_update(None, "mmap_size", 268_435_456_i64)?; // 256MB
                log::info!("📊 Enabled WAL mode with relaxed sync");
            }
            PragmaProfile::Safety => {
                conn.pragma_update(None, "journal_mode", "DELETE")?;
                conn.pragma_update(None, "synchronous", "FULL")?;
                conn.pragma_update(None, "cache_size", 1_000)?;
                conn.pragma_update(None, "temp_store", "FILE")?;
                log::info!("🔒 Enabled full-sync journaling");
            }
            PragmaProfile::EngineDefault => {}
        }
        Ok(())
    }
}
