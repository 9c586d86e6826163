//! Record windows.
//!
//! Both the history and the live stream can be capped to their first `n`
//! valid records. The cap is a policy knob with an explicit unbounded value.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of history records loaded by default.
pub const DEFAULT_HISTORY_WINDOW: usize = 500;

/// How many valid records to take from an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// Take everything.
    #[default]
    Unbounded,
    /// Take at most this many records.
    First(usize),
}

impl Window {
    /// Whether `taken` records already fill the window.
    pub const fn is_full(self, taken: usize) -> bool {
        match self {
            Window::Unbounded => false,
            Window::First(n) => taken >= n,
        }
    }

    /// The cap, if any.
    pub const fn limit(self) -> Option<usize> {
        match self {
            Window::Unbounded => None,
            Window::First(n) => Some(n),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Window::Unbounded => write!(f, "all"),
            Window::First(n) => write!(f, "{}", n),
        }
    }
}

/// A window string was neither `all`/`unbounded` nor a count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid window {0:?}: expected a record count or \"all\"")]
pub struct ParseWindowError(String);

impl FromStr for Window {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("unbounded") {
            return Ok(Window::Unbounded);
        }
        s.parse()
            .map(Window::First)
            .map_err(|_| ParseWindowError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_counts_and_sentinels() {
        assert_eq!("500".parse::<Window>().unwrap(), Window::First(500));
        assert_eq!("all".parse::<Window>().unwrap(), Window::Unbounded);
        assert_eq!("Unbounded".parse::<Window>().unwrap(), Window::Unbounded);
        assert!("-1".parse::<Window>().is_err());
        assert!("lots".parse::<Window>().is_err());
    }

    #[test]
    fn fullness() {
        assert!(!Window::Unbounded.is_full(usize::MAX));
        assert!(!Window::First(2).is_full(1));
        assert!(Window::First(2).is_full(2));
        assert!(Window::First(0).is_full(0));
    }

    #[test]
    fn display_round_trips() {
        for w in [Window::Unbounded, Window::First(12)] {
            assert_eq!(w.to_string().parse::<Window>().unwrap(), w);
        }
        assert_eq!(Window::First(3).limit(), Some(3));
        assert_eq!(Window::Unbounded.limit(), None);
    }
}
