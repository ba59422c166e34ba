use serde::Serialize;

/// Exchange an instrument trades on. Stocks and ETFs on the same
/// exchange collapse to the same label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    Nasdaq,
    Nyse,
    Nysemkt,
}

impl Exchange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Nasdaq => "NASDAQ",
            Exchange::Nyse => "NYSE",
            Exchange::Nysemkt => "NYSEMKT",
        }
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instrument's open/high/low/close/volume for a single trading day.
///
/// `date` is the raw 8-digit field reassembled as `YYYY-MM-DD`. It is
/// deliberately a string, not a calendar type: the source files are
/// trusted for calendar validity and a month of "13" passes through
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub symbol: String,
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Per-run counters, aggregated bottom-up from file to exchange root
/// to run level. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionTally {
    pub files_seen: u64,
    pub records_written: u64,
    pub records_rejected: u64,
}

impl IngestionTally {
    pub fn absorb(&mut self, other: IngestionTally) {
        self.files_seen += other.files_seen;
        self.records_written += other.records_written;
        self.records_rejected += other.records_rejected;
    }
}

/// Final outcome of a full import run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub files_seen: u64,
    pub records_written: u64,
    pub records_rejected: u64,
    pub symbols_refreshed: usize,
    pub elapsed_secs: f64,
    pub records_per_sec: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_labels() {
        assert_eq!(Exchange::Nasdaq.as_str(), "NASDAQ");
        assert_eq!(Exchange::Nyse.as_str(), "NYSE");
        assert_eq!(Exchange::Nysemkt.as_str(), "NYSEMKT");
    }

    #[test]
    fn test_tally_absorb() {
        let mut total = IngestionTally::default();
        total.absorb(IngestionTally {
            files_seen: 2,
            records_written: 100,
            records_rejected: 3,
        });
        total.absorb(IngestionTally {
            files_seen: 1,
            records_written: 50,
            records_rejected: 0,
        });

        assert_eq!(total.files_seen, 3);
        assert_eq!(total.records_written, 150);
        assert_eq!(total.records_rejected, 3);
    }
}
