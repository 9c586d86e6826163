//! Error types for payguard-records.

use thiserror::Error;

/// Result type for record loading.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Why a line could not be turned into a payment record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// Fewer than the four required comma-separated fields.
    #[error("expected at least 4 fields, found {0}")]
    TooFewFields(usize),
    /// A payer or payee field is not an integer.
    #[error("field {field} is not a user id: {value:?}")]
    InvalidId {
        /// 0-based field position
        field: usize,
        /// The offending text
        value: String,
    },
}

/// Errors raised while reading a transaction log.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The underlying reader failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed (only surfaced under the fail policy).
    #[error("malformed record on line {line}: {reason}")]
    Malformed {
        /// 1-based line number, header included
        line: usize,
        /// What was wrong with it
        reason: MalformedReason,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_line_and_field() {
        let err = RecordError::Malformed {
            line: 7,
            reason: MalformedReason::InvalidId {
                field: 2,
                value: "x".to_string(),
            },
        };
        assert_eq!(err.to_string(), "malformed record on line 7: field 2 is not a user id: \"x\"");
        assert_eq!(
            MalformedReason::TooFewFields(3).to_string(),
            "expected at least 4 fields, found 3"
        );
    }
}
