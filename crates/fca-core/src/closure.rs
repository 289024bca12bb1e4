//! The closure-system capability.
//!
//! A closure system is a ground set together with a closure operator that
//! must be:
//!  - Extensive: X ⊆ closure(X)
//!  - Idempotent: closure(closure(X)) = closure(X)
//!  - Monotone: X ⊆ Y ⇒ closure(X) ⊆ closure(Y)
//!
//! Lattice construction and basis extraction only ever call `closure`.

use crate::concept::Concept;
use crate::context::Context;
use crate::error::{Axiom, ClosureError, Result};
use crate::ground::GroundSet;
use crate::implications::ImplicationalSystem;
use crate::set::ComparableSet;
use fca_graph::{DiGraph, NodeId};
use serde::{Deserialize, Serialize};

/// Anything that can close a set of ground elements.
pub trait ClosureSystem {
    /// The ordered ground set the closure operates on.
    fn ground_set(&self) -> &GroundSet;

    /// The closure of `set`.
    fn closure(&self, set: &ComparableSet) -> ComparableSet;

    /// Turn a closed set into a concept. Systems that know objects fill in
    /// the extent.
    fn concept(&self, closed: ComparableSet) -> Concept {
        Concept::closed_set(closed)
    }

    fn is_closed(&self, set: &ComparableSet) -> bool {
        self.closure(set) == *set
    }

    /// The closure of `set`, rejected if it does not contain `set`.
    fn checked_closure(&self, set: &ComparableSet) -> Result<ComparableSet> {
        let closed = self.closure(set);
        if !set.is_subset(&closed) {
            tracing::warn!(%set, %closed, "closure is not extensive");
            return Err(ClosureError::AxiomViolation {
                axiom: Axiom::Extensivity,
                set: set.clone(),
            });
        }
        Ok(closed)
    }

    /// Check all three axioms on a pair of sets; `smaller` should be a
    /// subset of `larger` for the monotonicity check to apply.
    fn check_axioms(&self, smaller: &ComparableSet, larger: &ComparableSet) -> Result<()> {
        let closed_small = self.checked_closure(smaller)?;
        let closed_large = self.checked_closure(larger)?;

        if self.closure(&closed_small) != closed_small {
            return Err(ClosureError::AxiomViolation {
                axiom: Axiom::Idempotence,
                set: smaller.clone(),
            });
        }
        if smaller.is_subset(larger) && !closed_small.is_subset(&closed_large) {
            return Err(ClosureError::AxiomViolation {
                axiom: Axiom::Monotonicity,
                set: smaller.clone(),
            });
        }
        Ok(())
    }

    /// Precedence graph of the ground set: edge `x -> y` iff `x` belongs to
    /// `closure({y})` and `x != y`. Node content is the element index.
    ///
    /// Fails with [`ClosureError::UnknownElement`] if a closure leaves the
    /// ground set.
    fn precedence_graph(&self) -> Result<DiGraph<usize>> {
        let size = self.ground_set().len();
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeId> = (0..size).map(|element| graph.add_node(element)).collect();

        for (y, &target) in nodes.iter().enumerate() {
            for x in self.closure(&ComparableSet::singleton(y)).iter() {
                if x == y {
                    continue;
                }
                let source = *nodes
                    .get(x)
                    .ok_or(ClosureError::UnknownElement { index: x, size })?;
                graph.add_edge(source, target)?;
            }
        }
        Ok(graph)
    }
}

/// The two concrete closure systems, dispatched by tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyClosureSystem {
    /// A formal context: closure is the double derivation.
    Context(Context),

    /// A set of implications: closure is saturation.
    Implications(ImplicationalSystem),
}

impl AnyClosureSystem {
    pub fn as_context(&self) -> Option<&Context> {
        match self {
            AnyClosureSystem::Context(context) => Some(context),
            AnyClosureSystem::Implications(_) => None,
        }
    }

    pub fn as_implications(&self) -> Option<&ImplicationalSystem> {
        match self {
            AnyClosureSystem::Context(_) => None,
            AnyClosureSystem::Implications(system) => Some(system),
        }
    }

    pub fn is_context(&self) -> bool {
        matches!(self, AnyClosureSystem::Context(_))
    }
}

impl ClosureSystem for AnyClosureSystem {
    fn ground_set(&self) -> &GroundSet {
        match self {
            AnyClosureSystem::Context(context) => context.ground_set(),
            AnyClosureSystem::Implications(system) => system.ground_set(),
        }
    }

    fn closure(&self, set: &ComparableSet) -> ComparableSet {
        match self {
            AnyClosureSystem::Context(context) => context.closure(set),
            AnyClosureSystem::Implications(system) => system.closure(set),
        }
    }

    fn concept(&self, closed: ComparableSet) -> Concept {
        match self {
            AnyClosureSystem::Context(context) => context.concept(closed),
            AnyClosureSystem::Implications(system) => system.concept(closed),
        }
    }
}

impl From<Context> for AnyClosureSystem {
    fn from(context: Context) -> Self {
        AnyClosureSystem::Context(context)
    }
}

impl From<ImplicationalSystem> for AnyClosureSystem {
    fn from(system: ImplicationalSystem) -> Self {
        AnyClosureSystem::Implications(system)
    }
}
