//! # fca-lattice
//!
//! Concept lattice construction for the FCA engine.
//!
//! Two interchangeable builders turn any [`ClosureSystem`](fca_core::ClosureSystem)
//! into a [`ConceptLattice`]:
//!
//! - [`next_closure`]: Ganter's lectic enumeration, edges derived afterwards
//! - [`bordat`]: covering successors read off the precedence graph, edges
//!   wired as concepts are discovered
//!
//! Both produce the same intents and the same covering pairs.
//!
//! ## Example
//!
//! ```rust
//! use fca_core::Context;
//! use fca_lattice::{Algorithm, BuildConfigBuilder, ConceptLattice};
//!
//! let mut context = Context::with_labels(["1", "2"], ["a", "b"]).unwrap();
//! context.add_relation_by_label("1", "a").unwrap();
//! context.add_relation_by_label("2", "b").unwrap();
//!
//! let config = BuildConfigBuilder::new().algorithm(Algorithm::Bordat).build();
//! let lattice = ConceptLattice::build(&context, &config).unwrap();
//! assert_eq!(lattice.len(), 4);
//! ```

pub mod bordat;
pub mod config;
pub mod error;
pub mod lattice;
pub mod next_closure;

pub use bordat::{immediate_successors, precedence_graph, Candidate};
pub use config::{Algorithm, BuildConfig, BuildConfigBuilder};
pub use error::{LatticeError, Result};
pub use lattice::{ConceptLattice, Covers};
pub use next_closure::{all_closures, closed_set_lattice, next_closure};
