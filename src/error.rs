//! Error types for graph operations.

use thiserror::Error;

/// Failures raised by [`OrderedGraph`](crate::OrderedGraph) operations.
///
/// Every check runs before any write, so a returned error always leaves
/// the graph untouched. Expected outcomes such as duplicate inserts or
/// erasing something absent are plain `bool` results, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An operation required a node that is not in the graph.
    #[error("cannot call {operation} when node `{node}` does not exist in the graph")]
    NodeNotFound {
        /// Name of the operation that was refused.
        operation: &'static str,
        /// Text form of the missing node.
        node: String,
    },

    /// A cursor range was given with its start ordered after its end.
    #[error("invalid cursor range: start is further down the graph than end")]
    InvalidRange,
}

impl GraphError {
    pub(crate) fn node_not_found(operation: &'static str, node: &impl std::fmt::Display) -> Self {
        Self::NodeNotFound {
            operation,
            node: node.to_string(),
        }
    }
}

/// Result alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
