//! Import configuration from environment variables.

use crate::sqlite_pragma::PragmaProfile;
use crate::store::CommitPolicy;
use crate::types::Exchange;
use std::env;
use std::path::PathBuf;

/// Exchange root directories under the data directory, in processing
/// order. Stocks and ETFs on the same exchange share a label.
pub const EXCHANGE_ROOTS: &[(&str, Exchange)] = &[
    ("nasdaq stocks", Exchange::Nasdaq),
    ("nyse stocks", Exchange::Nyse),
    ("nysemkt stocks", Exchange::Nysemkt),
    ("nasdaq etfs", Exchange::Nasdaq),
    ("nyse etfs", Exchange::Nyse),
    ("nysemkt etfs", Exchange::Nysemkt),
];

/// Files committed per batch when `periodic` is given without a count.
const DEFAULT_FILES_PER_COMMIT: usize = 25;

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Path to the SQLite database file (must already exist with schema)
    pub db_path: PathBuf,

    /// Root of the exchange directory tree
    pub data_dir: PathBuf,

    /// How writes are grouped into transactions
    pub commit_policy: CommitPolicy,

    /// SQLite engine tuning
    pub pragma_profile: PragmaProfile,

    /// Optional JSONL file receiving one summary line per run
    pub report_path: Option<PathBuf>,
}

impl ImportConfig {
    /// Load configuration from environment variables.
    ///
    /// - `BARFLOW_DB_PATH` (default: database/market_data.db)
    /// - `BARFLOW_DATA_DIR` (default: data/daily/us)
    /// - `BARFLOW_COMMIT_POLICY` (default: per-file)
    /// - `BARFLOW_PRAGMA_PROFILE` (default: throughput)
    /// - `BARFLOW_REPORT_PATH` (default: unset, no report)
    ///
    /// An unrecognized policy or profile string is an error, not a
    /// silent default: the commit policy is the run's central
    /// durability decision.
    pub fn from_env() -> Result<Self, ConfigError> {
        let db_path = env::var("BARFLOW_DB_PATH")
            .unwrap_or_else(|_| "database/market_data.db".to_string())
            .into();

        let data_dir = env::var("BARFLOW_DATA_DIR")
            .unwrap_or_else(|_| "data/daily/us".to_string())
            .into();

        let commit_policy = match env::var("BARFLOW_COMMIT_POLICY") {
            Ok(s) => parse_commit_policy(&s)?,
            Err(_) => CommitPolicy::PerFile,
        };

        let pragma_profile = match env::var("BARFLOW_PRAGMA_PROFILE") {
            Ok(s) => parse_pragma_profile(&s)?,
            Err(_) => PragmaProfile::Throughput,
        };

        let report_path = env::var("BARFLOW_REPORT_PATH").ok().map(PathBuf::from);

        Ok(Self {
            db_path,
            data_dir,
            commit_policy,
            pragma_profile,
            report_path,
        })
    }
}

/// Parse a commit policy string: `per-file`, `per-record`,
/// `autocommit`, `periodic` or `periodic:<n>`.
pub fn parse_commit_policy(s: &str) -> Result<CommitPolicy, ConfigError> {
    match s {
        "per-file" => Ok(CommitPolicy::PerFile),
        "per-record" => Ok(CommitPolicy::PerRecord),
        "autocommit" => Ok(CommitPolicy::Autocommit),
        "periodic" => Ok(CommitPolicy::Periodic {
            files_per_commit: DEFAULT_FILES_PER_COMMIT,
        }),
        other => {
            if let Some(count) = other.strip_prefix("periodic:") {
                let files_per_commit = count
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        ConfigError::InvalidValue(format!(
                            "periodic batch size must be a positive integer, got '{}'",
                            count
                        ))
                    })?;
                Ok(CommitPolicy::Periodic { files_per_commit })
            } else {
                Err(ConfigError::InvalidValue(format!(
                    "unknown commit policy '{}' (expected per-file, periodic[:<n>], per-record or autocommit)",
                    other
                )))
            }
        }
    }
}

pub fn parse_pragma_profile(s: &str) -> Result<PragmaProfile, ConfigError> {
    match s {
        "throughput" => Ok(PragmaProfile::Throughput),
        "safety" => Ok(PragmaProfile::Safety),
        "default" => Ok(PragmaProfile::EngineDefault),
        other => Err(ConfigError::InvalidValue(format!(
            "unknown pragma profile '{}' (expected throughput, safety or default)",
            other
        ))),
    }
}
