//! PayGuard Transaction Records
//!
//! Reads comma-delimited payment logs into ordered `(payer, payee)` records.
//! The same format is used for the historical batch and for the live stream.
//!
//! - The first line is a header and is discarded
//! - Fields 1 and 2 (0-based) are the payer and payee ids
//! - Malformed lines are skipped and counted, or fatal under [`MalformedPolicy::Fail`]
//! - A [`Window`] caps how many valid records are taken

mod error;
mod reader;
mod window;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use payguard_graph::UserId;
use tracing::{debug, warn};

pub use error::{MalformedReason, RecordError, Result};
pub use reader::{parse_line, LoadStats, MalformedPolicy, PaymentRecord, RecordReader, MIN_FIELDS};
pub use window::{ParseWindowError, Window, DEFAULT_HISTORY_WINDOW};

/// A fully read transaction log.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    /// First four header columns.
    pub header: Vec<String>,
    /// Valid records in file order.
    pub records: Vec<PaymentRecord>,
    /// Read statistics.
    pub stats: LoadStats,
}

impl LoadedRecords {
    /// `(payer, payee)` pairs in file order.
    pub fn pairs(&self) -> impl Iterator<Item = (UserId, UserId)> + '_ {
        self.records.iter().map(PaymentRecord::pair)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read every record (within `window`) from a buffered reader.
pub fn load_reader<R: BufRead>(reader: R, window: Window, policy: MalformedPolicy) -> Result<LoadedRecords> {
    let mut records_reader = RecordReader::new(reader, window, policy)?;
    let records = records_reader.by_ref().collect::<Result<Vec<_>>>()?;
    let stats = records_reader.stats();

    if stats.malformed > 0 {
        warn!("Skipped {} malformed lines", stats.malformed);
    }

    Ok(LoadedRecords {
        header: records_reader.header().to_vec(),
        records,
        stats,
    })
}

/// Read every record (within `window`) from a file.
pub fn load_path(path: impl AsRef<Path>, window: Window, policy: MalformedPolicy) -> Result<LoadedRecords> {
    let path = path.as_ref();
    debug!("Loading records from {}", path.display());
    let file = File::open(path)?;
    let loaded = load_reader(BufReader::new(file), window, policy)?;
    debug!(
        records = loaded.stats.records,
        malformed = loaded.stats.malformed,
        truncated = loaded.stats.truncated,
        "Loaded {}",
        path.display()
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_file_with_window() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "time, id1, id2, amount, message").unwrap();
        for i in 0..10i64 {
            writeln!(file, "2016-11-01 17:38:25, {}, {}, 10.00, note", i, i + 1).unwrap();
        }

        let loaded = load_path(file.path(), Window::First(4), MalformedPolicy::Fail).unwrap();
        assert_eq!(loaded.len(), 4);
        assert!(loaded.stats.truncated);
        assert_eq!(loaded.header, vec!["time", "id1", "id2", "amount"]);

        let pairs: Vec<_> = loaded.pairs().collect();
        assert_eq!(pairs[3], (UserId(3), UserId(4)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_path(dir.path().join("nope.csv"), Window::Unbounded, MalformedPolicy::Skip).unwrap_err();
        assert!(matches!(err, RecordError::Io(_)));
    }

    #[test]
    fn fail_policy_propagates() {
        let text = "h\n0, 1, 2, 3\nbroken\n";
        let err = load_reader(text.as_bytes(), Window::Unbounded, MalformedPolicy::Fail).unwrap_err();
        assert!(matches!(err, RecordError::Malformed { line: 3, .. }));
    }

    #[test]
    fn latin1_message_does_not_abort_load() {
        let bytes: &[u8] = b"hdr\n0, 1, 2, 1.00, ok\n0, 3, 4, 1.00, caf\xE9\n0, 5, 6, 1.00, ok\n";
        let loaded = load_reader(bytes, Window::Unbounded, MalformedPolicy::Skip).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.stats.malformed, 0);
    }

    #[test]
    fn skip_policy_reports_counts() {
        let text = "h\n0, 1, 2, 3\nbroken\n0, 4, 5, 6\n";
        let loaded = load_reader(text.as_bytes(), Window::Unbounded, MalformedPolicy::Skip).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.stats.malformed, 1);
    }
}
