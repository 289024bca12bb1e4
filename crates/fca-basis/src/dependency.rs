//! Dependency graph between ground elements.

use crate::error::Result;
use crate::generators::minimal_generators;
use fca_core::{ComparableSet, GroundSet};
use fca_graph::{DiGraph, NodeId};
use fca_lattice::ConceptLattice;
use std::collections::{BTreeMap, BTreeSet};

/// Edge label: the minimal generators that carry the dependency.
pub type Generators = BTreeSet<ComparableSet>;

/// Graph over the elements of `ground`, one node per element holding its
/// index. There is an edge `j -> i` whenever `j` belongs to a minimal
/// generator `g` of some concept `C` and `i ∈ C \ g`; the edge is labelled
/// with every such `g`.
pub fn dependency_graph(
    lattice: &ConceptLattice,
    ground: &GroundSet,
) -> Result<DiGraph<usize, Generators>> {
    let generators = minimal_generators(lattice)?;

    let mut labels: BTreeMap<(usize, usize), Generators> = BTreeMap::new();
    for (id, found) in &generators {
        let intent = lattice.intent(*id);
        for generator in found {
            let implied = intent.difference(generator);
            for source in generator.iter() {
                for target in implied.iter() {
                    labels
                        .entry((source, target))
                        .or_default()
                        .insert(generator.clone());
                }
            }
        }
    }

    let mut graph = DiGraph::new();
    let nodes: Vec<NodeId> = (0..ground.len()).map(|e| graph.add_node(e)).collect();
    for ((source, target), generators) in labels {
        if let (Some(&s), Some(&t)) = (nodes.get(source), nodes.get(target)) {
            graph.add_edge_with(s, t, generators)?;
        }
    }

    tracing::debug!(
        elements = graph.node_count(),
        dependencies = graph.edge_count(),
        "dependency graph built"
    );
    Ok(graph)
}
