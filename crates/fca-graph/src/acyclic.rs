//! Acyclic graphs and the Goralcikova–Koubek closure/reduction.
//!
//! Acyclicity is checked when the graph is built, not maintained: edits made
//! through [`AcyclicGraph::graph_mut`] must be followed by
//! [`AcyclicGraph::verify`].

use crate::error::{GraphError, Result};
use crate::graph::DiGraph;
use crate::node::NodeId;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Deref;

/// A directed graph known to contain no cycle.
///
/// Serialized as the plain graph; deserializing goes through
/// [`TryFrom<DiGraph>`] and rejects cycles.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "DiGraph<N, E>")]
pub struct AcyclicGraph<N, E = ()> {
    graph: DiGraph<N, E>,
}

/// Both edge sets produced by one Goralcikova–Koubek pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitiveEdges {
    /// Covering edges (the transitive reduction).
    pub reduced: Vec<(NodeId, NodeId)>,

    /// Every reachability pair (the transitive closure).
    pub closure: Vec<(NodeId, NodeId)>,
}

impl<N, E> Default for AcyclicGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> AcyclicGraph<N, E> {
    /// Create a new empty acyclic graph.
    pub fn new() -> Self {
        AcyclicGraph {
            graph: DiGraph::new(),
        }
    }

    /// Wrap a graph the caller has already shown to be acyclic.
    pub(crate) fn from_verified(graph: DiGraph<N, E>) -> Self {
        AcyclicGraph { graph }
    }

    pub fn graph(&self) -> &DiGraph<N, E> {
        &self.graph
    }

    /// Mutable access to the underlying graph. Call [`Self::verify`]
    /// after adding edges.
    pub fn graph_mut(&mut self) -> &mut DiGraph<N, E> {
        &mut self.graph
    }

    pub fn into_inner(self) -> DiGraph<N, E> {
        self.graph
    }

    /// Adding an isolated node cannot create a cycle.
    pub fn add_node(&mut self, content: N) -> NodeId {
        self.graph.add_node(content)
    }

    /// Check that the graph is still acyclic.
    pub fn verify(&self) -> Result<()> {
        if self.graph.is_acyclic() {
            Ok(())
        } else {
            Err(GraphError::CyclicInput)
        }
    }

    /// Transitive closure and reduction in one pass.
    ///
    /// Nodes are processed in reverse topological order so that the
    /// reachable set of every successor is known. The successors of `x` are
    /// scanned by increasing topological rank: the first one not yet marked
    /// is a covering edge, and it marks itself together with everything it
    /// reaches. All marked nodes are the closure of `x`.
    pub fn closure_and_reduction(&self) -> Result<TransitiveEdges> {
        let order = self.graph.topological_sort();
        if order.len() != self.graph.node_count() {
            return Err(GraphError::CyclicInput);
        }

        let rank: BTreeMap<NodeId, usize> =
            order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let mut reach: Vec<Vec<usize>> = vec![Vec::new(); order.len()];
        let mut marked = vec![false; order.len()];
        let mut edges = TransitiveEdges::default();

        for x in (0..order.len()).rev() {
            let source = order[x];
            let mut succs: Vec<usize> = self
                .graph
                .successors(source)
                .filter_map(|s| rank.get(&s).copied())
                .collect();
            succs.sort_unstable();

            let mut touched = Vec::new();
            for y in succs {
                if marked[y] {
                    continue;
                }
                edges.reduced.push((source, order[y]));
                marked[y] = true;
                touched.push(y);
                for &z in &reach[y] {
                    if !marked[z] {
                        marked[z] = true;
                        touched.push(z);
                    }
                }
            }

            touched.sort_unstable();
            for &t in &touched {
                marked[t] = false;
                edges.closure.push((source, order[t]));
            }
            reach[x] = touched;
        }

        Ok(edges)
    }

    /// Add every missing reachability edge. Returns the number added.
    pub fn transitive_closure(&mut self) -> Result<usize> {
        let edges = self.closure_and_reduction()?;
        let mut added = 0;
        for (source, target) in edges.closure {
            if self.graph.add_edge(source, target)? {
                added += 1;
            }
        }
        tracing::debug!(added, "acyclic transitive closure computed");
        Ok(added)
    }

    /// Remove every edge implied by transitivity. Returns the number removed.
    pub fn transitive_reduction(&mut self) -> Result<usize> {
        let edges = self.closure_and_reduction()?;
        let keep: BTreeSet<(NodeId, NodeId)> = edges.reduced.into_iter().collect();
        let redundant: Vec<(NodeId, NodeId)> = self
            .graph
            .edges()
            .map(|(source, target, _)| (source, target))
            .filter(|edge| !keep.contains(edge))
            .collect();

        for (source, target) in &redundant {
            self.graph.remove_edge(*source, *target);
        }
        tracing::debug!(removed = redundant.len(), "acyclic transitive reduction computed");
        Ok(redundant.len())
    }
}

impl<N, E> TryFrom<DiGraph<N, E>> for AcyclicGraph<N, E> {
    type Error = GraphError;

    /// Drop loops, then require the rest of the graph to be acyclic.
    fn try_from(mut graph: DiGraph<N, E>) -> Result<Self> {
        graph.reflexive_reduction();
        if graph.is_acyclic() {
            Ok(AcyclicGraph { graph })
        } else {
            Err(GraphError::CyclicInput)
        }
    }
}

impl<N: Serialize, E: Serialize> Serialize for AcyclicGraph<N, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.graph.serialize(serializer)
    }
}

impl<N, E> Deref for AcyclicGraph<N, E> {
    type Target = DiGraph<N, E>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> (AcyclicGraph<char>, [NodeId; 4]) {
        let mut graph = DiGraph::new();
        let a = graph.add_node('a');
        let b = graph.add_node('b');
        let c = graph.add_node('c');
        let d = graph.add_node('d');
        for (s, t) in [(a, b), (a, c), (b, d), (c, d), (a, d)] {
            graph.add_edge(s, t).unwrap();
        }
        (AcyclicGraph::try_from(graph).unwrap(), [a, b, c, d])
    }

    #[test]
    fn test_cyclic_input_is_rejected() {
        let mut graph: DiGraph<u8> = DiGraph::new();
        let a = graph.add_node(0);
        let b = graph.add_node(1);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, a).unwrap();

        let result = AcyclicGraph::try_from(graph);
        assert!(matches!(result, Err(GraphError::CyclicInput)));
    }

    #[test]
    fn test_loops_are_dropped() {
        let mut graph: DiGraph<u8> = DiGraph::new();
        let a = graph.add_node(0);
        graph.add_edge(a, a).unwrap();

        let dag = AcyclicGraph::try_from(graph).unwrap();
        assert_eq!(dag.edge_count(), 0);
    }

    #[test]
    fn test_diamond_reduction() {
        let (mut dag, [a, b, c, d]) = diamond();

        assert_eq!(dag.transitive_reduction().unwrap(), 1);
        assert!(!dag.contains_edge(a, d));
        assert!(dag.contains_edge(a, b));
        assert!(dag.contains_edge(a, c));
        assert!(dag.contains_edge(b, d));
        assert!(dag.contains_edge(c, d));
    }

    #[test]
    fn test_one_pass_gives_both_edge_sets() {
        let (dag, [a, _, _, d]) = diamond();
        let edges = dag.closure_and_reduction().unwrap();

        assert_eq!(edges.reduced.len(), 4);
        assert_eq!(edges.closure.len(), 5);
        assert!(edges.closure.contains(&(a, d)));
        assert!(!edges.reduced.contains(&(a, d)));
    }

    #[test]
    fn test_closure_after_reduction_restores_edges() {
        let (mut dag, _) = diamond();
        dag.transitive_reduction().unwrap();

        assert_eq!(dag.transitive_closure().unwrap(), 1);
        assert_eq!(dag.edge_count(), 5);
    }

    #[test]
    fn test_verify_after_edit() {
        let (mut dag, [a, _, _, d]) = diamond();
        assert!(dag.verify().is_ok());

        dag.graph_mut().add_edge(d, a).unwrap();
        assert_eq!(dag.verify(), Err(GraphError::CyclicInput));
        assert!(dag.closure_and_reduction().is_err());
    }

    #[test]
    fn test_cycle_in_json_is_rejected() {
        let mut graph: DiGraph<u8> = DiGraph::new();
        let a = graph.add_node(0);
        let b = graph.add_node(1);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, a).unwrap();

        let json = serde_json::to_string(&graph).unwrap();
        let parsed: std::result::Result<AcyclicGraph<u8>, _> = serde_json::from_str(&json);
        let message = parsed.unwrap_err().to_string();
        assert!(message.contains("cycle"), "{}", message);
    }

    #[test]
    fn test_dag_round_trips_through_json() {
        let (dag, [a, _, _, d]) = diamond();

        let json = serde_json::to_string(&dag).unwrap();
        let parsed: AcyclicGraph<char> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.node_count(), 4);
        assert_eq!(parsed.edge_count(), dag.edge_count());
        assert!(parsed.contains_edge(a, d));
    }
}
