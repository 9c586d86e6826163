//! User identifiers.
//!
//! The reference transaction log carries integer ids, so a user is a thin
//! wrapper around `i64`. Signed, so that any integer the log holds is a valid
//! id, negative ones included. Nothing about the id is interpreted beyond equality,
//! ordering and hashing.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// An opaque, comparable user key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserId(pub i64);

impl UserId {
    /// Create a new user id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    /// Parse an id, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
