//! Recursive discovery of data files under an exchange root.

use crate::parser::strip_market_suffix;
use crate::types::Exchange;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension marking a file as ingestible.
pub const DATA_EXTENSION: &str = "txt";

/// One discovered data file, mapped to its symbol and exchange.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub symbol: String,
    pub exchange: Exchange,
}

/// Derive the symbol from a data file name: strip the `.txt`
/// extension, strip the market suffix, upper-case the rest.
/// `AAPL.us.txt` and `aapl.us.txt` both map to `AAPL`.
pub fn symbol_from_filename(name: &str) -> String {
    let stem = name.strip_suffix(".txt").unwrap_or(name);
    strip_market_suffix(stem).to_uppercase()
}

/// Enumerate every `*.txt` file under `root`, recursing into
/// subdirectories in listing order (filesystem-dependent, not
/// sorted). A listing failure is logged and skips that subtree only;
/// sibling subtrees are still walked. Other file types are ignored.
pub fn collect_data_files(root: &Path, exchange: Exchange) -> Vec<SourceFile> {
    let mut files = Vec::new();
    walk_into(root, exchange, &mut files);
    files
}

fn walk_into(dir: &Path, exchange: Exchange, out: &mut Vec<SourceFile>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("❌ Error listing directory {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.filter_map(|entry| entry.ok()) {
        let path = entry.path();
        if path.is_dir() {
            walk_into(&path, exchange, out);
        } else if path.extension().and_then(|ext| ext.to_str()) == Some(DATA_EXTENSION) {
            let name = entry.file_name();
            out.push(SourceFile {
                symbol: symbol_from_filename(&name.to_string_lossy()),
                exchange,
                path,
            });
        }
    }
}
