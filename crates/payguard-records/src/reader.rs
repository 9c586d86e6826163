//! Streaming reader for transaction logs.
//!
//! Line format (header line first, discarded):
//!
//! ```text
//! time, id1, id2, amount, message
//! 2016-11-02 09:49:29, 52575, 1120, 25.32, Spam
//! ```
//!
//! Only fields 1 and 2 (payer, payee) are interpreted. Extra fields, including
//! commas inside the message, are ignored.

use std::io::{self, BufRead};

use payguard_graph::UserId;
use tracing::{debug, warn};

use crate::error::{MalformedReason, RecordError, Result};
use crate::Window;

/// Minimum number of comma-separated fields on a data line.
pub const MIN_FIELDS: usize = 4;

/// What to do with a line that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Count it, log it, keep going.
    #[default]
    Skip,
    /// Stop with an error.
    Fail,
}

/// One parsed payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentRecord {
    /// Payer
    pub from: UserId,
    /// Payee
    pub to: UserId,
    /// 1-based source line, header included
    pub line: usize,
}

impl PaymentRecord {
    /// `(payer, payee)`.
    pub const fn pair(&self) -> (UserId, UserId) {
        (self.from, self.to)
    }
}

/// Counts gathered while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadStats {
    /// Data lines read (header excluded).
    pub lines: usize,
    /// Valid records yielded.
    pub records: usize,
    /// Lines that failed to parse.
    pub malformed: usize,
    /// Empty or whitespace-only lines.
    pub blank: usize,
    /// The window filled before the input ran out.
    pub truncated: bool,
}

/// Parse the payer and payee out of one data line.
pub fn parse_line(line: &str) -> std::result::Result<(UserId, UserId), MalformedReason> {
    let fields: Vec<&str> = line.splitn(MIN_FIELDS + 1, ',').collect();
    if fields.len() < MIN_FIELDS {
        return Err(MalformedReason::TooFewFields(fields.len()));
    }
    let id = |field: usize| {
        fields[field]
            .parse::<UserId>()
            .map_err(|_| MalformedReason::InvalidId {
                field,
                value: fields[field].trim().to_string(),
            })
    };
    Ok((id(1)?, id(2)?))
}

/// Read one line without its terminator, or `None` at end of input.
///
/// Bytes that are not UTF-8 are replaced with U+FFFD. Only the id fields are
/// interpreted, so a stray byte in the free-text message costs nothing, and
/// one inside an id makes that id fail to parse.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Option<io::Result<String>> {
    buf.clear();
    match reader.read_until(b'\n', buf) {
        Ok(0) => None,
        Ok(_) => {
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            Some(Ok(String::from_utf8_lossy(buf).into_owned()))
        }
        Err(e) => Some(Err(e)),
    }
}

/// Iterator over the valid records of a transaction log.
///
/// The header is consumed on construction. Blank lines are ignored. Once the
/// window is full, or the fail policy hits a malformed line, the iterator is
/// exhausted.
pub struct RecordReader<R> {
    reader: R,
    buf: Vec<u8>,
    header: Vec<String>,
    line_no: usize,
    window: Window,
    policy: MalformedPolicy,
    stats: LoadStats,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    /// Start reading, consuming the header line.
    pub fn new(mut reader: R, window: Window, policy: MalformedPolicy) -> Result<Self> {
        let mut buf = Vec::new();
        let (header, line_no) = match read_line(&mut reader, &mut buf) {
            Some(line) => {
                let line = line?;
                let header = line.split(',').take(MIN_FIELDS).map(|c| c.trim().to_string()).collect();
                (header, 1)
            }
            None => (Vec::new(), 0),
        };
        Ok(Self {
            reader,
            buf,
            header,
            line_no,
            window,
            policy,
            stats: LoadStats::default(),
            done: false,
        })
    }

    /// First four header columns, trimmed.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Counts so far.
    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        read_line(&mut self.reader, &mut self.buf)
    }

    /// Note whether anything but blank lines is left past a full window.
    fn check_truncation(&mut self) {
        loop {
            match self.next_line() {
                None => break,
                Some(Ok(l)) if l.trim().is_empty() => continue,
                Some(Ok(_)) => {
                    self.stats.truncated = true;
                    warn!(
                        "Input truncated to the first {} records; remaining lines ignored",
                        self.stats.records
                    );
                    break;
                }
                Some(Err(e)) => {
                    debug!("Could not read past the full window: {}", e);
                    break;
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<PaymentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            if self.window.is_full(self.stats.records) {
                self.done = true;
                self.check_truncation();
                return None;
            }

            let line = match self.next_line()? {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };
            self.line_no += 1;
            self.stats.lines += 1;

            if line.trim().is_empty() {
                self.stats.blank += 1;
                continue;
            }

            match parse_line(&line) {
                Ok((from, to)) => {
                    self.stats.records += 1;
                    return Some(Ok(PaymentRecord {
                        from,
                        to,
                        line: self.line_no,
                    }));
                }
                Err(reason) => {
                    self.stats.malformed += 1;
                    match self.policy {
                        MalformedPolicy::Skip => {
                            debug!(line = self.line_no, "Skipping malformed record: {}", reason);
                        }
                        MalformedPolicy::Fail => {
                            self.done = true;
                            return Some(Err(RecordError::Malformed {
                                line: self.line_no,
                                reason,
                            }));
                        }
                    }
                }
            }
        }
    }
}
