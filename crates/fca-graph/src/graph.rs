//! General directed graph.
//!
//! Nodes live in an arena keyed by [`NodeId`]; successor and predecessor
//! adjacency are kept symmetric so that both directions can be walked in
//! O(degree).

use crate::acyclic::AcyclicGraph;
use crate::error::{GraphError, Result};
use crate::node::{Edge, IdAllocator, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Directed graph with node content `N` and optional edge content `E`.
///
/// Deserialized graphs are checked: adjacency must only name known nodes,
/// both indexes must agree, and every id must come from the allocator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawGraph<N, E>")]
pub struct DiGraph<N, E = ()> {
    /// Source of ids for nodes added to this graph.
    allocator: IdAllocator,

    /// Node contents indexed by id.
    nodes: BTreeMap<NodeId, N>,

    /// Forward index: source -> (target -> edge content).
    successors: BTreeMap<NodeId, BTreeMap<NodeId, Option<E>>>,

    /// Reverse index: target -> sources.
    predecessors: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

/// Wire form of a [`DiGraph`], before validation.
#[derive(Deserialize)]
struct RawGraph<N, E> {
    allocator: IdAllocator,
    nodes: BTreeMap<NodeId, N>,
    successors: BTreeMap<NodeId, BTreeMap<NodeId, Option<E>>>,
    predecessors: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl<N, E> TryFrom<RawGraph<N, E>> for DiGraph<N, E> {
    type Error = GraphError;

    fn try_from(raw: RawGraph<N, E>) -> Result<Self> {
        if let Some(&last) = raw.nodes.keys().next_back() {
            if last.value() >= raw.allocator.allocated() {
                return Err(GraphError::StaleAllocator(last));
            }
        }

        let mut graph = DiGraph::with_allocator(raw.allocator);
        for (id, content) in raw.nodes {
            graph.insert_node(id, content);
        }
        for (&id, preds) in &raw.predecessors {
            if !graph.contains_node(id) {
                return Err(GraphError::NodeNotFound(id));
            }
            for source in preds {
                let listed = raw
                    .successors
                    .get(source)
                    .map(|succs| succs.contains_key(&id))
                    .unwrap_or(false);
                if !listed {
                    return Err(GraphError::InconsistentAdjacency(id));
                }
            }
        }
        for (source, targets) in raw.successors {
            if !graph.contains_node(source) {
                return Err(GraphError::NodeNotFound(source));
            }
            for (target, content) in targets {
                if !graph.contains_node(target) {
                    return Err(GraphError::NodeNotFound(target));
                }
                let listed = raw
                    .predecessors
                    .get(&target)
                    .map(|preds| preds.contains(&source))
                    .unwrap_or(false);
                if !listed {
                    return Err(GraphError::InconsistentAdjacency(source));
                }
                graph.insert_edge(source, target, content);
            }
        }
        Ok(graph)
    }
}

impl<N, E> Default for DiGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> DiGraph<N, E> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        DiGraph {
            allocator: IdAllocator::new(),
            nodes: BTreeMap::new(),
            successors: BTreeMap::new(),
            predecessors: BTreeMap::new(),
        }
    }

    /// Empty graph that continues the id sequence of `allocator`.
    fn with_allocator(allocator: IdAllocator) -> Self {
        DiGraph {
            allocator,
            nodes: BTreeMap::new(),
            successors: BTreeMap::new(),
            predecessors: BTreeMap::new(),
        }
    }

    /// Insert a node, returning its freshly allocated id.
    pub fn add_node(&mut self, content: N) -> NodeId {
        let id = self.allocator.allocate();
        self.insert_node(id, content);
        id
    }

    fn insert_node(&mut self, id: NodeId, content: N) {
        self.nodes.insert(id, content);
        self.successors.entry(id).or_default();
        self.predecessors.entry(id).or_default();
    }

    /// Remove a node together with all its incident edges.
    pub fn remove_node(&mut self, id: NodeId) -> Option<N> {
        let content = self.nodes.remove(&id)?;

        if let Some(targets) = self.successors.remove(&id) {
            for target in targets.keys() {
                if let Some(preds) = self.predecessors.get_mut(target) {
                    preds.remove(&id);
                }
            }
        }
        if let Some(sources) = self.predecessors.remove(&id) {
            for source in sources {
                if let Some(succs) = self.successors.get_mut(&source) {
                    succs.remove(&id);
                }
            }
        }

        Some(content)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Content of a node.
    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(&id)
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        self.nodes.iter().map(|(id, content)| (*id, content))
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add an edge without content.
    ///
    /// Returns `Ok(false)` if the edge already existed.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<bool> {
        self.check_endpoints(source, target)?;
        Ok(self.insert_edge(source, target, None))
    }

    /// Add an edge carrying `content`.
    ///
    /// An existing edge keeps its previous content.
    pub fn add_edge_with(&mut self, source: NodeId, target: NodeId, content: E) -> Result<bool> {
        self.check_endpoints(source, target)?;
        Ok(self.insert_edge(source, target, Some(content)))
    }

    fn check_endpoints(&self, source: NodeId, target: NodeId) -> Result<()> {
        if !self.contains_node(source) {
            return Err(GraphError::NodeNotFound(source));
        }
        if !self.contains_node(target) {
            return Err(GraphError::NodeNotFound(target));
        }
        Ok(())
    }

    /// Insert an edge between two known nodes.
    fn insert_edge(&mut self, source: NodeId, target: NodeId, content: Option<E>) -> bool {
        let succs = self.successors.entry(source).or_default();
        if succs.contains_key(&target) {
            return false;
        }
        succs.insert(target, content);
        self.predecessors.entry(target).or_default().insert(source);
        true
    }

    /// Remove an edge, returning whether it existed.
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> bool {
        let removed = self
            .successors
            .get_mut(&source)
            .map(|succs| succs.remove(&target).is_some())
            .unwrap_or(false);
        if removed {
            if let Some(preds) = self.predecessors.get_mut(&target) {
                preds.remove(&source);
            }
        }
        removed
    }

    pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.successors
            .get(&source)
            .map(|succs| succs.contains_key(&target))
            .unwrap_or(false)
    }

    /// Content of an edge, if the edge exists and carries any.
    pub fn edge_content(&self, source: NodeId, target: NodeId) -> Option<&E> {
        self.successors
            .get(&source)
            .and_then(|succs| succs.get(&target))
            .and_then(|content| content.as_ref())
    }

    /// All edges as `(source, target, content)`, ordered by `(source, target)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, Option<&E>)> + '_ {
        self.successors.iter().flat_map(|(source, succs)| {
            succs
                .iter()
                .map(move |(target, content)| (*source, *target, content.as_ref()))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.successors.values().map(|succs| succs.len()).sum()
    }

    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.successors
            .get(&id)
            .into_iter()
            .flat_map(|succs| succs.keys().copied())
    }

    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.predecessors
            .get(&id)
            .into_iter()
            .flat_map(|preds| preds.iter().copied())
    }

    pub fn out_degree(&self, id: NodeId) -> usize {
        self.successors.get(&id).map(|s| s.len()).unwrap_or(0)
    }

    pub fn in_degree(&self, id: NodeId) -> usize {
        self.predecessors.get(&id).map(|p| p.len()).unwrap_or(0)
    }

    /// Nodes without predecessors.
    pub fn sinks(&self) -> Vec<NodeId> {
        self.node_ids().filter(|id| self.in_degree(*id) == 0).collect()
    }

    /// Nodes without successors.
    pub fn wells(&self) -> Vec<NodeId> {
        self.node_ids().filter(|id| self.out_degree(*id) == 0).collect()
    }

    /// Add a loop on every node. Returns the number of loops added.
    pub fn reflexive_closure(&mut self) -> usize {
        let ids: Vec<NodeId> = self.node_ids().collect();
        ids.into_iter()
            .filter(|id| self.insert_edge(*id, *id, None))
            .count()
    }

    /// Remove every loop. Returns the number of loops removed.
    pub fn reflexive_reduction(&mut self) -> usize {
        let ids: Vec<NodeId> = self.node_ids().collect();
        ids.into_iter().filter(|id| self.remove_edge(*id, *id)).count()
    }

    /// Depth-first traversal of the whole graph.
    ///
    /// Roots are taken in id order. Returns the nodes in first-visited
    /// (preorder) and last-visited (finish) order.
    pub fn depth_first_search(&self) -> (Vec<NodeId>, Vec<NodeId>) {
        let mut visited = BTreeSet::new();
        let mut first = Vec::with_capacity(self.node_count());
        let mut last = Vec::with_capacity(self.node_count());

        for root in self.node_ids() {
            if visited.insert(root) {
                first.push(root);
                self.walk(root, &mut visited, &mut first, &mut last, |g, id| {
                    g.successors(id).collect()
                });
            }
        }

        (first, last)
    }

    /// Iterative DFS below `root` along `next`, which lists the neighbours
    /// to follow. `root` must already be marked visited.
    fn walk<F>(
        &self,
        root: NodeId,
        visited: &mut BTreeSet<NodeId>,
        first: &mut Vec<NodeId>,
        last: &mut Vec<NodeId>,
        next: F,
    ) where
        F: Fn(&Self, NodeId) -> Vec<NodeId>,
    {
        let mut stack: Vec<(NodeId, Vec<NodeId>, usize)> = vec![(root, next(self, root), 0)];

        while let Some(frame) = stack.last_mut() {
            if let Some(&neighbour) = frame.1.get(frame.2) {
                frame.2 += 1;
                if visited.insert(neighbour) {
                    first.push(neighbour);
                    let neighbours = next(self, neighbour);
                    stack.push((neighbour, neighbours, 0));
                }
            } else {
                last.push(frame.0);
                stack.pop();
            }
        }
    }

    /// Topological order by Kahn's algorithm.
    ///
    /// On a cyclic graph the result is a partial order that leaves out every
    /// node on or behind a cycle, so `len() < node_count()` signals a cycle.
    pub fn topological_sort(&self) -> Vec<NodeId> {
        let mut remaining: BTreeMap<NodeId, usize> = BTreeMap::new();
        let mut queue = VecDeque::new();
        let mut result = Vec::with_capacity(self.node_count());

        for id in self.node_ids() {
            let degree = self.in_degree(id);
            remaining.insert(id, degree);
            if degree == 0 {
                queue.push_back(id);
            }
        }

        while let Some(id) = queue.pop_front() {
            result.push(id);
            for succ in self.successors(id) {
                if let Some(degree) = remaining.get_mut(&succ) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        queue.push_back(succ);
                    }
                }
            }
        }

        result
    }

    pub fn is_acyclic(&self) -> bool {
        self.topological_sort().len() == self.node_count()
    }

    /// Transitive closure of an arbitrary graph, in place.
    ///
    /// For each source, a breadth-first search marks every reachable node
    /// and one edge is added per reached node. Nodes on a cycle get a loop.
    /// Returns the number of edges added.
    pub fn transitive_closure(&mut self) -> usize {
        let ids: Vec<NodeId> = self.node_ids().collect();
        let mut added = 0;

        for source in ids {
            let mut marked: BTreeSet<NodeId> = BTreeSet::new();
            let mut queue: VecDeque<NodeId> = VecDeque::new();
            for succ in self.successors(source) {
                marked.insert(succ);
                queue.push_back(succ);
            }

            while let Some(current) = queue.pop_front() {
                for next in self.successors(current) {
                    if marked.insert(next) {
                        queue.push_back(next);
                    }
                }
            }

            for target in marked {
                if self.insert_edge(source, target, None) {
                    added += 1;
                }
            }
        }

        tracing::debug!(nodes = self.node_count(), added, "transitive closure computed");
        added
    }

    /// Strongly connected components by Kosaraju's algorithm.
    ///
    /// The result is the condensation: one node per component whose content
    /// is the set of member ids, and an edge between two components iff some
    /// edge of this graph crosses from one to the other.
    pub fn strongly_connected_components(&self) -> AcyclicGraph<BTreeSet<NodeId>, ()> {
        let (_, finish) = self.depth_first_search();

        // Following predecessors is a DFS over the transposed graph.
        let mut visited = BTreeSet::new();
        let mut condensation: DiGraph<BTreeSet<NodeId>, ()> = DiGraph::new();
        let mut component_of: BTreeMap<NodeId, NodeId> = BTreeMap::new();

        for &root in finish.iter().rev() {
            if !visited.insert(root) {
                continue;
            }
            let mut members = vec![root];
            let mut finished = Vec::new();
            self.walk(root, &mut visited, &mut members, &mut finished, |g, id| {
                g.predecessors(id).collect()
            });

            let members: BTreeSet<NodeId> = members.into_iter().collect();
            let component = condensation.add_node(members.clone());
            for member in members {
                component_of.insert(member, component);
            }
        }

        for (source, target, _) in self.edges() {
            let endpoints = (component_of.get(&source), component_of.get(&target));
            if let (Some(&from), Some(&to)) = endpoints {
                if from != to {
                    condensation.insert_edge(from, to, None);
                }
            }
        }
        condensation.reflexive_reduction();

        tracing::debug!(
            nodes = self.node_count(),
            components = condensation.node_count(),
            "strongly connected components computed"
        );
        AcyclicGraph::from_verified(condensation)
    }
}

impl<N: Clone, E: Clone> DiGraph<N, E> {
    /// Owned copies of all edges in `(source, target)` order.
    pub fn edge_list(&self) -> Vec<Edge<E>> {
        self.edges()
            .map(|(source, target, content)| Edge {
                source,
                target,
                content: content.cloned(),
            })
            .collect()
    }

    /// Same nodes, no edges. Ids are preserved.
    fn empty_copy(&self) -> Self {
        let mut graph = DiGraph::with_allocator(self.allocator.clone());
        for (id, content) in self.nodes() {
            graph.insert_node(id, content.clone());
        }
        graph
    }

    /// Subgraph induced by a node set: those nodes and every edge between them.
    pub fn subgraph_by_nodes(&self, keep: &BTreeSet<NodeId>) -> Self {
        let mut graph = DiGraph::with_allocator(self.allocator.clone());
        for (id, content) in self.nodes().filter(|(id, _)| keep.contains(id)) {
            graph.insert_node(id, content.clone());
        }
        for (source, target, content) in self.edges() {
            if keep.contains(&source) && keep.contains(&target) {
                graph.insert_edge(source, target, content.cloned());
            }
        }
        graph
    }

    /// Subgraph induced by an edge set: every node, and only those of the
    /// given edges that belong to this graph.
    pub fn subgraph_by_edges(&self, keep: &[(NodeId, NodeId)]) -> Self {
        let mut graph = self.empty_copy();
        for &(source, target) in keep {
            if let Some(content) = self.successors.get(&source).and_then(|s| s.get(&target)) {
                graph.insert_edge(source, target, content.clone());
            }
        }
        graph
    }

    /// Complementary graph: edge `(x, y)` iff this graph has no such edge,
    /// loops included.
    pub fn complementary(&self) -> Self {
        let mut graph = self.empty_copy();
        let ids: Vec<NodeId> = self.node_ids().collect();
        for &source in &ids {
            for &target in &ids {
                if !self.contains_edge(source, target) {
                    graph.insert_edge(source, target, None);
                }
            }
        }
        graph
    }

    /// Same nodes with every edge reversed.
    pub fn transpose(&self) -> Self {
        let mut graph = self.empty_copy();
        for (source, target, content) in self.edges() {
            graph.insert_edge(target, source, content.cloned());
        }
        graph
    }
}
