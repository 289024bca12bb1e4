//! Concept lattices.
//!
//! A concept lattice is an acyclic graph of concepts where an edge `A -> B`
//! means `intent(A) ⊂ intent(B)`. The bottom is the closure of the empty
//! set and the top is the closure of the whole ground set. Edges are either
//! the full inclusion order or only the covering (Hasse) pairs; the cover
//! queries below work on both.

use crate::bordat;
use crate::config::{Algorithm, BuildConfig};
use crate::error::Result;
use crate::next_closure;
use fca_core::{ClosureSystem, ComparableSet, Concept};
use fca_graph::{AcyclicGraph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Upper and lower covers of every concept.
#[derive(Clone, Debug, Default)]
pub struct Covers {
    lower: BTreeMap<NodeId, Vec<NodeId>>,
    upper: BTreeMap<NodeId, Vec<NodeId>>,
}

impl Covers {
    /// Concepts directly below `id`.
    pub fn lower(&self, id: NodeId) -> &[NodeId] {
        self.lower.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Concepts directly above `id`.
    pub fn upper(&self, id: NodeId) -> &[NodeId] {
        self.upper.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Covering pairs `(lower, upper)`.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.upper
            .iter()
            .flat_map(|(low, highs)| highs.iter().map(move |high| (*low, *high)))
    }
}

/// The lattice of closed sets of a closure system.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConceptLattice {
    graph: AcyclicGraph<Concept>,
}

impl ConceptLattice {
    pub fn new() -> Self {
        ConceptLattice {
            graph: AcyclicGraph::new(),
        }
    }

    pub(crate) fn from_graph(graph: AcyclicGraph<Concept>) -> Self {
        ConceptLattice { graph }
    }

    /// Build the lattice of `system` with the configured algorithm.
    pub fn build<S>(system: &S, config: &BuildConfig) -> Result<Self>
    where
        S: ClosureSystem + ?Sized,
    {
        match config.algorithm {
            Algorithm::NextClosure => next_closure::closed_set_lattice(system, config),
            Algorithm::Bordat => bordat::bordat(system, config),
        }
    }

    pub fn graph(&self) -> &AcyclicGraph<Concept> {
        &self.graph
    }

    pub fn into_graph(self) -> AcyclicGraph<Concept> {
        self.graph
    }

    pub fn concept(&self, id: NodeId) -> Option<&Concept> {
        self.graph.node(id)
    }

    pub fn concepts(&self) -> impl Iterator<Item = (NodeId, &Concept)> + '_ {
        self.graph.nodes()
    }

    /// Intent of a concept; empty when unknown.
    pub fn intent(&self, id: NodeId) -> &ComparableSet {
        static EMPTY: ComparableSet = ComparableSet::new();
        self.concept(id)
            .map(Concept::intent_or_empty)
            .unwrap_or(&EMPTY)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The concept with the given intent.
    pub fn find(&self, intent: &ComparableSet) -> Option<NodeId> {
        self.concepts()
            .find(|(_, concept)| concept.intent() == Some(intent))
            .map(|(id, _)| id)
    }

    /// The least concept, if there is exactly one minimal node.
    pub fn bottom(&self) -> Option<NodeId> {
        match self.graph.sinks().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// The greatest concept, if there is exactly one maximal node.
    pub fn top(&self) -> Option<NodeId> {
        match self.graph.wells().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// `a ≤ b` in the lattice order.
    pub fn leq(&self, a: NodeId, b: NodeId) -> bool {
        self.intent(a).is_subset(self.intent(b))
    }

    /// Covering relation, derived from one transitive reduction pass.
    pub fn covers(&self) -> Result<Covers> {
        let edges = self.graph.closure_and_reduction()?;
        let mut covers = Covers::default();
        for id in self.graph.node_ids() {
            covers.lower.insert(id, Vec::new());
            covers.upper.insert(id, Vec::new());
        }
        for (low, high) in edges.reduced {
            covers.upper.entry(low).or_default().push(high);
            covers.lower.entry(high).or_default().push(low);
        }
        Ok(covers)
    }

    /// Whether the edges are exactly the covering pairs.
    pub fn is_diagram(&self) -> Result<bool> {
        let edges = self.graph.closure_and_reduction()?;
        Ok(edges.reduced.len() == self.graph.edge_count())
    }

    /// Concepts with exactly one lower cover.
    pub fn join_irreducibles(&self) -> Result<BTreeSet<NodeId>> {
        let covers = self.covers()?;
        Ok(self
            .graph
            .node_ids()
            .filter(|id| covers.lower(*id).len() == 1)
            .collect())
    }

    /// Concepts with exactly one upper cover.
    pub fn meet_irreducibles(&self) -> Result<BTreeSet<NodeId>> {
        let covers = self.covers()?;
        Ok(self
            .graph
            .node_ids()
            .filter(|id| covers.upper(*id).len() == 1)
            .collect())
    }

    /// Every intent of the lattice.
    pub fn intents(&self) -> BTreeSet<ComparableSet> {
        self.concepts()
            .map(|(_, concept)| concept.intent_or_empty().clone())
            .collect()
    }

    /// Covering pairs named by intent, independent of node ids.
    pub fn covering_intents(&self) -> Result<BTreeSet<(ComparableSet, ComparableSet)>> {
        let covers = self.covers()?;
        Ok(covers
            .pairs()
            .map(|(low, high)| (self.intent(low).clone(), self.intent(high).clone()))
            .collect())
    }

    /// Drop every non-covering edge. Returns the number removed.
    pub fn transitive_reduction(&mut self) -> Result<usize> {
        Ok(self.graph.transitive_reduction()?)
    }

    /// Add every inclusion edge. Returns the number added.
    pub fn transitive_closure(&mut self) -> Result<usize> {
        Ok(self.graph.transitive_closure()?)
    }

    /// The suborder on `keep`, with covering edges only.
    ///
    /// Node ids are preserved, so irreducibles computed on this lattice
    /// still name the same concepts.
    pub fn restrict(&self, keep: &BTreeSet<NodeId>) -> Result<ConceptLattice> {
        let mut order = self.graph.clone();
        order.transitive_closure()?;

        let mut graph = AcyclicGraph::try_from(order.subgraph_by_nodes(keep))?;
        graph.transitive_reduction()?;
        tracing::debug!(
            kept = graph.node_count(),
            of = self.len(),
            "lattice restricted"
        );
        Ok(ConceptLattice { graph })
    }
}
