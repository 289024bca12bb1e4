//! Error types for the graph kernel.

use crate::node::NodeId;
use thiserror::Error;

/// Errors that can occur in graph operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Graph contains a cycle and cannot be viewed as acyclic")]
    CyclicInput,

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Adjacency of node {0} is inconsistent")]
    InconsistentAdjacency(NodeId),

    #[error("Node {0} was not handed out by the graph's allocator")]
    StaleAllocator(NodeId),
}

pub type Result<T> = std::result::Result<T, GraphError>;
