// File: `crates/fca-core/src/lib.rs`
//! # fca-core
//!
//! Closure systems for the FCA engine.
//!
//! - [`ComparableSet`]: element sets under the lectic order
//! - [`GroundSet`]: the label registry that fixes the element order
//! - [`ClosureSystem`]: the `closure` capability every algorithm builds on
//! - [`Context`] and [`ImplicationalSystem`]: its two implementations,
//!   wrapped by the tagged [`AnyClosureSystem`]
//! - [`Concept`]: an (extent, intent) pair

pub mod closure;
pub mod concept;
pub mod context;
pub mod error;
pub mod ground;
pub mod implications;
pub mod set;

pub use closure::{AnyClosureSystem, ClosureSystem};
pub use concept::Concept;
pub use context::{Arrow, Context};
pub use error::{Axiom, ClosureError, Result};
pub use ground::GroundSet;
pub use implications::{ImplicationalSystem, Rule};
pub use set::ComparableSet;
