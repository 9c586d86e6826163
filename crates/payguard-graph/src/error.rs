//! Error types for payguard-graph.

use thiserror::Error;

use crate::UserId;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised by graph queries.
///
/// These indicate a caller handed the graph inconsistent input. Ordinary
/// negative answers ("no path within bound") are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A query endpoint is not a node of the graph.
    #[error("user {0} is not a node of the trust graph")]
    UnknownNode(UserId),
}
