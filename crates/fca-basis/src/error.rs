//! Error types for basis extraction.

use fca_core::ClosureError;
use fca_graph::GraphError;
use fca_lattice::LatticeError;
use thiserror::Error;

/// Errors that can occur while extracting bases or reducing a lattice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BasisError {
    #[error("Lattice error: {0}")]
    Lattice(#[from] LatticeError),

    #[error("Closure error: {0}")]
    Closure(#[from] ClosureError),
}

impl From<GraphError> for BasisError {
    fn from(err: GraphError) -> Self {
        BasisError::Lattice(LatticeError::Graph(err))
    }
}

pub type Result<T> = std::result::Result<T, BasisError>;
