//! File-level ingestion: read one data file and stage its bars.

use crate::parser;
use crate::types::{Exchange, PriceBar};
use crate::walker::SourceFile;
use std::fs;

/// Bars staged for write from one source file, plus the parse
/// rejection count. Exactly one symbol registration accompanies the
/// staged bars regardless of how many lines parsed.
#[derive(Debug)]
pub struct StagedFile {
    pub symbol: String,
    pub exchange: Exchange,
    pub bars: Vec<PriceBar>,
    pub rejected: u64,
}

/// Read `source` and stage every parseable line.
///
/// The first line is discarded unconditionally as a header. A read
/// failure (missing file, non-UTF-8 content) is logged and counted as
/// one rejection for the whole file; it never aborts the run.
pub fn stage_file(source: &SourceFile) -> StagedFile {
    let mut staged = StagedFile {
        symbol: source.symbol.clone(),
        exchange: source.exchange,
        bars: Vec::new(),
        rejected: 0,
    };

    let contents = match fs::read_to_string(&source.path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("❌ Error reading {}: {}", source.path.display(), e);
            staged.rejected = 1;
            return staged;
        }
    };

    // Skip header line
    for line in contents.lines().skip(1) {
        match parser::parse_line(line) {
            Some(bar) => staged.bars.push(bar),
            None => staged.rejected += 1,
        }
    }

    staged
}
