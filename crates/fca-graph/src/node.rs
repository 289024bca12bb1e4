//! Node identifiers, the id allocator and edges.
//!
//! Every node of a graph is identified by a [`NodeId`] handed out by the
//! graph's own [`IdAllocator`]. Ids are the sole equality and ordering key
//! for nodes: two nodes with equal content are still distinct nodes.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identifier of a node inside a graph.
///
/// Ordered by allocation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Raw numeric value of the id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic single-owner allocator of node ids.
///
/// Each graph owns one allocator, so building two graphs never interleaves
/// their id sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator starting at id 0.
    pub fn new() -> Self {
        IdAllocator { next: 0 }
    }

    /// Hand out the next id.
    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next
    }
}

/// An owned edge: ordered pair of nodes plus optional content.
///
/// Edges compare by `(source, target)` only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge<E> {
    pub source: NodeId,
    pub target: NodeId,
    pub content: Option<E>,
}

impl<E> Edge<E> {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Edge {
            source,
            target,
            content: None,
        }
    }

    pub fn with_content(source: NodeId, target: NodeId, content: E) -> Self {
        Edge {
            source,
            target,
            content: Some(content),
        }
    }

    /// `(source, target)` pair of this edge.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.source, self.target)
    }

    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }
}

impl<E> PartialEq for Edge<E> {
    fn eq(&self, other: &Self) -> bool {
        self.endpoints() == other.endpoints()
    }
}

impl<E> Eq for Edge<E> {}

impl<E> PartialOrd for Edge<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Edge<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.endpoints().cmp(&other.endpoints())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = IdAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        let c = alloc.allocate();

        assert!(a < b && b < c);
        assert_eq!(alloc.allocated(), 3);
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut first = IdAllocator::new();
        let mut second = IdAllocator::new();

        first.allocate();
        first.allocate();

        assert_eq!(second.allocate().value(), 0);
    }

    #[test]
    fn test_edge_order_ignores_content() {
        let mut alloc = IdAllocator::new();
        let x = alloc.allocate();
        let y = alloc.allocate();
        let z = alloc.allocate();

        let e1 = Edge::with_content(x, z, "late");
        let e2 = Edge::with_content(y, x, "early");
        let e3 = Edge::with_content(x, z, "other");

        assert!(e1 < e2);
        assert_eq!(e1, e3);
        assert!(!e1.is_loop());
        assert!(Edge::<()>::new(y, y).is_loop());
    }
}
