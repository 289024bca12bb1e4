//! Ganter's Next Closure.
//!
//! Closed sets are produced one at a time in strictly increasing lectic
//! order, starting from `closure(∅)`. The successor of a closed set `C` is
//! found by scanning the ground elements from the largest down: for the
//! first `i ∉ C` whose candidate `closure((C ∩ {x < i}) ∪ {i})` agrees with
//! `C` below `i`, that candidate is the next closed set.
//!
//! Only nodes come out of the enumeration; the edges are derived afterwards
//! from pairwise inclusion.

use crate::config::BuildConfig;
use crate::error::{LatticeError, Result};
use crate::lattice::ConceptLattice;
use fca_core::{ClosureSystem, ComparableSet, Concept};
use fca_graph::{AcyclicGraph, DiGraph, NodeId};

/// The lectic successor of the closed set `current`, or `None` if
/// `current` is the last closed set.
///
/// Every candidate is checked for extensivity; that check alone forces
/// the successor to be lectically larger, so enumeration always ends.
pub fn next_closure<S>(system: &S, current: &ComparableSet) -> Result<Option<ComparableSet>>
where
    S: ClosureSystem + ?Sized,
{
    for i in (0..system.ground_set().len()).rev() {
        if current.contains(i) {
            continue;
        }
        let mut generator = current.below(i);
        generator.insert(i);

        let candidate = system.checked_closure(&generator)?;
        if candidate.agrees_below(current, i) {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Every closed set of `system` in lectic order.
pub fn all_closures<S>(system: &S, config: &BuildConfig) -> Result<Vec<ComparableSet>>
where
    S: ClosureSystem + ?Sized,
{
    let mut closures = Vec::new();
    let mut current = Some(system.checked_closure(&ComparableSet::new())?);

    while let Some(closed) = current {
        if !config.allows(closures.len() + 1) {
            let limit = config.max_concepts.unwrap_or(closures.len());
            tracing::warn!(limit, "next closure stopped: concept budget exceeded");
            return Err(LatticeError::BudgetExceeded { limit });
        }
        current = next_closure(system, &closed)?;
        tracing::trace!(%closed, "closed set enumerated");
        closures.push(closed);
    }

    tracing::debug!(closed_sets = closures.len(), "next closure enumeration finished");
    Ok(closures)
}

/// Lattice of all closed sets, edges by pairwise inclusion.
///
/// With `config.diagram` set the inclusion order is transitively reduced
/// to its covering pairs.
pub fn closed_set_lattice<S>(system: &S, config: &BuildConfig) -> Result<ConceptLattice>
where
    S: ClosureSystem + ?Sized,
{
    let closures = all_closures(system, config)?;

    let mut graph: DiGraph<Concept> = DiGraph::new();
    let ids: Vec<NodeId> = closures
        .iter()
        .map(|closed| graph.add_node(system.concept(closed.clone())))
        .collect();

    // Lectic order extends inclusion, so only later sets can be supersets.
    for (i, smaller) in closures.iter().enumerate() {
        for (j, larger) in closures.iter().enumerate().skip(i + 1) {
            if smaller.is_proper_subset(larger) {
                graph.add_edge(ids[i], ids[j])?;
            }
        }
    }

    let mut lattice = AcyclicGraph::try_from(graph)?;
    if config.diagram {
        lattice.transitive_reduction()?;
    }

    tracing::debug!(
        concepts = lattice.node_count(),
        edges = lattice.edge_count(),
        "closed set lattice built"
    );
    Ok(ConceptLattice::from_graph(lattice))
}
