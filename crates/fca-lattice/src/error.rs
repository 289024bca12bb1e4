//! Error types for lattice construction.

use fca_core::ClosureError;
use fca_graph::GraphError;
use thiserror::Error;

/// Errors that can occur while building or querying a concept lattice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Closure error: {0}")]
    Closure(#[from] ClosureError),

    #[error("Concept budget exceeded: more than {limit} concepts")]
    BudgetExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, LatticeError>;
