//! Line parser for daily-bar data files.
//!
//! Each data line carries exactly 10 comma-separated fields:
//! `<TICKER>,<PER>,<DATE>,<TIME>,<OPEN>,<HIGH>,<LOW>,<CLOSE>,<VOL>,<OPENINT>`
//! Only ticker, date and the five numeric fields survive parsing.

use crate::types::PriceBar;

/// Ticker value of the header line shipped at the top of every file.
const HEADER_TICKER: &str = "<TICKER>";

/// Strip a trailing `.US` or `.us` market suffix. Exact, case-sensitive
/// match on these two forms only (`.Us` is left alone).
pub fn strip_market_suffix(ticker: &str) -> &str {
    ticker
        .strip_suffix(".US")
        .or_else(|| ticker.strip_suffix(".us"))
        .unwrap_or(ticker)
}

/// Parse one raw line into a [`PriceBar`].
///
/// Returns `None` for header lines, blank lines and anything
/// malformed; this function never fails past its boundary. The date
/// field must be exactly 8 ASCII digits and is reassembled as
/// `YYYY-MM-DD` without calendar validation.
pub fn parse_line(line: &str) -> Option<PriceBar> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() < 10 {
        return None;
    }

    let ticker = parts[0];
    let date = parts[2];

    // Header or blank/invalid line
    if ticker == HEADER_TICKER || ticker.is_empty() || date.is_empty() {
        return None;
    }

    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let formatted_date = format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..8]);

    let open: f64 = parts[4].parse().ok()?;
    let high: f64 = parts[5].parse().ok()?;
    let low: f64 = parts[6].parse().ok()?;
    let close: f64 = parts[7].parse().ok()?;
    let volume: f64 = parts[8].parse().ok()?;

    if ![open, high, low, close, volume].iter().all(|v| v.is_finite()) {
        return None;
    }

    Some(PriceBar {
        symbol: strip_market_suffix(ticker).to_string(),
        date: formatted_date,
        open,
        high,
        low,
        close,
        volume,
    })
}
