//! Evaluation policy.

use payguard_graph::DEFAULT_MAX_DEPTH;

use crate::error::{EngineError, Result};

/// Default number of evaluated requests between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 300_000;

/// Tunables for the stream processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnginePolicy {
    /// Maximum hop count for the bounded-path feature.
    pub max_depth: usize,
    /// Log progress every this many evaluated requests (0 disables).
    pub progress_interval: u64,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl EnginePolicy {
    /// Create a policy with basic validation.
    ///
    /// A depth of zero would make the bounded-path feature reject every
    /// request that reached it, so it is refused.
    pub fn new(max_depth: usize, progress_interval: u64) -> Result<Self> {
        if max_depth == 0 {
            return Err(EngineError::InvalidPolicy(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_depth,
            progress_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_policy() {
        let policy = EnginePolicy::default();
        assert_eq!(policy.max_depth, 4);
        assert_eq!(policy.progress_interval, 300_000);
    }

    #[test]
    fn rejects_zero_depth() {
        assert!(matches!(
            EnginePolicy::new(0, 10),
            Err(EngineError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn accepts_custom_depth() {
        let policy = EnginePolicy::new(6, 0).unwrap();
        assert_eq!(policy.max_depth, 6);
        assert_eq!(policy.progress_interval, 0);
    }
}
