//! Error types for closure systems.

use crate::set::ComparableSet;
use fca_graph::GraphError;
use std::fmt;
use thiserror::Error;

/// The closure-operator law a computation found broken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axiom {
    /// `X ⊆ closure(X)`
    Extensivity,
    /// `closure(closure(X)) = closure(X)`
    Idempotence,
    /// `X ⊆ Y ⇒ closure(X) ⊆ closure(Y)`
    Monotonicity,
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axiom::Extensivity => write!(f, "extensivity"),
            Axiom::Idempotence => write!(f, "idempotence"),
            Axiom::Monotonicity => write!(f, "monotonicity"),
        }
    }
}

/// Errors that can occur while building or querying a closure system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClosureError {
    #[error("Element index out of range: {index} (ground set size: {size})")]
    UnknownElement { index: usize, size: usize },

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Duplicate label: {0}")]
    DuplicateLabel(String),

    #[error("Closure operator violates {axiom} at {set}")]
    AxiomViolation { axiom: Axiom, set: ComparableSet },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type Result<T> = std::result::Result<T, ClosureError>;
