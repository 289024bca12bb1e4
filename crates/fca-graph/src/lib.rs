//! # fca-graph
//!
//! Graph kernel for the FCA engine.
//!
//! This crate provides:
//! - [`DiGraph`]: an arena of nodes with symmetric successor/predecessor
//!   adjacency, node- and edge-induced subgraphs, transpose, complement,
//!   iterative depth-first search, Kahn topological sort, breadth-first
//!   transitive closure and Kosaraju strongly connected components
//! - [`AcyclicGraph`]: a verified DAG with the Goralcikova–Koubek
//!   transitive closure/reduction
//!
//! Node ids come from an [`IdAllocator`] owned by each graph; there is no
//! process-wide counter.
//!
//! ## Example
//!
//! ```rust
//! use fca_graph::{AcyclicGraph, DiGraph};
//!
//! let mut graph = DiGraph::<u32>::new();
//! let a = graph.add_node(1);
//! let b = graph.add_node(2);
//! let c = graph.add_node(4);
//! graph.add_edge(a, b).unwrap();
//! graph.add_edge(b, c).unwrap();
//! graph.add_edge(a, c).unwrap();
//!
//! let mut dag = AcyclicGraph::try_from(graph).unwrap();
//! assert_eq!(dag.transitive_reduction().unwrap(), 1);
//! assert!(!dag.contains_edge(a, c));
//! ```

mod acyclic;
mod error;
mod graph;
mod node;

pub use acyclic::{AcyclicGraph, TransitiveEdges};
pub use error::{GraphError, Result};
pub use graph::DiGraph;
pub use node::{Edge, IdAllocator, NodeId};
