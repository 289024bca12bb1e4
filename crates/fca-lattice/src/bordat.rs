//! Bordat's algorithm.
//!
//! The lattice is grown from the bottom closed set. For each closed set
//! `F`, its covering successors are the minimal sets among
//! `closure(F ∪ {y})` for `y ∉ F`. They are read off the precedence graph
//! of `F`: the strongly connected components without predecessors are
//! exactly the elements whose closures are minimal, one component per
//! covering successor. Nodes and covering edges are discovered together,
//! so no pairwise inclusion test is needed.

use crate::config::BuildConfig;
use crate::error::{LatticeError, Result};
use crate::lattice::ConceptLattice;
use fca_core::{ClosureSystem, ComparableSet, Concept};
use fca_graph::{AcyclicGraph, DiGraph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Node of a precedence graph: an element outside the base set and the
/// closure obtained by adding it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub element: usize,
    pub closure: ComparableSet,
}

/// Precedence graph of the closed set `base`.
///
/// One node per element `y ∉ base`; edge `x -> y` iff adding `y` to
/// `base` forces `x` into the closure, i.e. `x ∈ closure(base ∪ {y})`.
pub fn precedence_graph<S>(system: &S, base: &ComparableSet) -> Result<DiGraph<Candidate>>
where
    S: ClosureSystem + ?Sized,
{
    let mut graph = DiGraph::new();
    let mut node_of: BTreeMap<usize, NodeId> = BTreeMap::new();

    for element in (0..system.ground_set().len()).filter(|e| !base.contains(*e)) {
        let mut generator = base.clone();
        generator.insert(element);
        let closure = system.checked_closure(&generator)?;
        let id = graph.add_node(Candidate { element, closure });
        node_of.insert(element, id);
    }

    let candidates: Vec<(NodeId, ComparableSet)> = graph
        .nodes()
        .map(|(id, candidate)| (id, candidate.closure.clone()))
        .collect();
    for (target, closure) in candidates {
        for forced in closure.difference(base).iter() {
            if let Some(&source) = node_of.get(&forced) {
                if source != target {
                    graph.add_edge(source, target)?;
                }
            }
        }
    }

    Ok(graph)
}

/// The closed sets covering the closed set `closed`, in lectic order.
pub fn immediate_successors<S>(system: &S, closed: &ComparableSet) -> Result<Vec<ComparableSet>>
where
    S: ClosureSystem + ?Sized,
{
    let precedence = precedence_graph(system, closed)?;
    let condensation = precedence.strongly_connected_components();

    let mut successors: Vec<ComparableSet> = condensation
        .sinks()
        .into_iter()
        .filter_map(|component| condensation.node(component)?.iter().next().copied())
        .filter_map(|member| precedence.node(member))
        .map(|candidate| candidate.closure.clone())
        .collect();
    successors.sort();
    successors.dedup();

    Ok(successors)
}

/// Build the lattice of `system` with covering edges only.
pub fn bordat<S>(system: &S, config: &BuildConfig) -> Result<ConceptLattice>
where
    S: ClosureSystem + ?Sized,
{
    let bottom = system.checked_closure(&ComparableSet::new())?;

    let mut graph: DiGraph<Concept> = DiGraph::new();
    let mut index: BTreeMap<ComparableSet, NodeId> = BTreeMap::new();
    let root = graph.add_node(system.concept(bottom.clone()));
    index.insert(bottom.clone(), root);

    let mut queue = VecDeque::from([(bottom, root)]);
    while let Some((closed, node)) = queue.pop_front() {
        let successors = immediate_successors(system, &closed)?;
        tracing::trace!(%closed, successors = successors.len(), "concept expanded");

        for successor in successors {
            let target = match index.get(&successor) {
                Some(&id) => id,
                None => {
                    if !config.allows(index.len() + 1) {
                        let limit = config.max_concepts.unwrap_or(index.len());
                        tracing::warn!(limit, "bordat stopped: concept budget exceeded");
                        return Err(LatticeError::BudgetExceeded { limit });
                    }
                    let id = graph.add_node(system.concept(successor.clone()));
                    index.insert(successor.clone(), id);
                    queue.push_back((successor, id));
                    id
                }
            };
            graph.add_edge(node, target)?;
        }
    }

    let lattice = AcyclicGraph::try_from(graph)?;
    tracing::debug!(
        concepts = lattice.node_count(),
        edges = lattice.edge_count(),
        "bordat lattice built"
    );
    Ok(ConceptLattice::from_graph(lattice))
}
