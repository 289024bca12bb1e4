//! # fca-basis
//!
//! Implication bases and reductions of concept lattices.
//!
//! - [`minimal_generators`]: the inclusion-minimal generating sets of every
//!   concept
//! - [`dependency_graph`]: which elements force which, labelled by the
//!   generators responsible
//! - [`canonical_direct_basis`] and [`canonical_basis`] (Duquenne–Guigues)
//! - [`join_reduction`], [`meet_reduction`], [`irreducibles_reduction`] and
//!   the reduced [`table`]
//!
//! ## Example
//!
//! ```rust
//! use fca_basis::canonical_basis;
//! use fca_core::{ClosureSystem, ImplicationalSystem};
//! use fca_lattice::{BuildConfig, ConceptLattice};
//!
//! let mut system = ImplicationalSystem::from_labels(["a", "b", "c"]).unwrap();
//! system.add_rule_by_labels(&["a"], &["b"]).unwrap();
//! system.add_rule_by_labels(&["a"], &["b", "c"]).unwrap();
//!
//! let lattice = ConceptLattice::build(&system, &BuildConfig::default()).unwrap();
//! let basis = canonical_basis(&lattice, system.ground_set()).unwrap();
//! assert_eq!(basis.rule_count(), 1);
//! assert!(basis.is_equivalent_to(&system));
//! ```

pub mod basis;
pub mod dependency;
pub mod error;
pub mod generators;
pub mod reduction;

pub use basis::{canonical_basis, canonical_direct_basis};
pub use dependency::{dependency_graph, Generators};
pub use error::{BasisError, Result};
pub use generators::{minimal_generators, minimal_transversals};
pub use reduction::{irreducibles_reduction, join_reduction, meet_reduction, table, table_intent};
