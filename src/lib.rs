//! # fca-engine
//!
//! Formal Concept Analysis: from a closure system (a formal context or a
//! set of implications) to its concept lattice, the irreducible skeleton of
//! that lattice and a minimal equivalent set of implications.
//!
//! The work is split across the workspace crates, re-exported here:
//!
//! - [`graph`]: directed graphs, DAG transitive closure/reduction, SCC
//! - [`closure`]: closure systems, lectic sets, concepts
//! - [`lattice`]: Next Closure and Bordat lattice builders
//! - [`basis`]: minimal generators, canonical bases, reductions
//!
//! ## Example
//!
//! ```rust
//! use fca_engine::basis::canonical_basis;
//! use fca_engine::closure::Context;
//! use fca_engine::lattice::{BuildConfig, ConceptLattice};
//!
//! let mut context = Context::with_labels(["1", "2", "3"], ["a", "b", "c", "d"]).unwrap();
//! for (g, m) in [("1", "a"), ("1", "c"), ("2", "a"), ("2", "b"),
//!                ("2", "c"), ("2", "d"), ("3", "a"), ("3", "b")] {
//!     context.add_relation_by_label(g, m).unwrap();
//! }
//!
//! let lattice = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();
//! assert_eq!(lattice.len(), 4);
//!
//! let basis = canonical_basis(&lattice, context.attributes()).unwrap();
//! assert_eq!(basis.rule_count(), 3);
//! ```

pub mod stress;

pub use fca_basis as basis;
pub use fca_core as closure;
pub use fca_graph as graph;
pub use fca_lattice as lattice;

pub use fca_basis::{canonical_basis, canonical_direct_basis, BasisError};
pub use fca_core::{
    AnyClosureSystem, ClosureSystem, ComparableSet, Concept, Context, ImplicationalSystem, Rule,
};
pub use fca_lattice::{Algorithm, BuildConfig, BuildConfigBuilder, ConceptLattice, LatticeError};
