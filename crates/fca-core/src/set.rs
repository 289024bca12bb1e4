//! Sets of ground-set elements under the lectic order.
//!
//! Elements are indices into a [`GroundSet`](crate::GroundSet); the index
//! order is the total order of the ground set. Sets compare lectically:
//! `A < B` iff the smallest element on which they differ belongs to `B`.
//! The lectic order is total and extends strict inclusion.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// A set of element indices ordered lectically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparableSet {
    elements: BTreeSet<usize>,
}

impl ComparableSet {
    pub const fn new() -> Self {
        ComparableSet {
            elements: BTreeSet::new(),
        }
    }

    pub fn singleton(element: usize) -> Self {
        let mut set = Self::new();
        set.insert(element);
        set
    }

    /// `{0, 1, .., len - 1}`.
    pub fn full(len: usize) -> Self {
        (0..len).collect()
    }

    pub fn insert(&mut self, element: usize) -> bool {
        self.elements.insert(element)
    }

    pub fn remove(&mut self, element: usize) -> bool {
        self.elements.remove(&element)
    }

    pub fn contains(&self, element: usize) -> bool {
        self.elements.contains(&element)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.elements.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn first(&self) -> Option<usize> {
        self.elements.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.elements.last().copied()
    }

    pub fn union(&self, other: &Self) -> Self {
        self.elements.union(&other.elements).copied().collect()
    }

    pub fn intersection(&self, other: &Self) -> Self {
        self.elements.intersection(&other.elements).copied().collect()
    }

    pub fn difference(&self, other: &Self) -> Self {
        self.elements.difference(&other.elements).copied().collect()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.elements.is_subset(&other.elements)
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        self.elements.is_superset(&other.elements)
    }

    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.len() < other.len() && self.is_subset(other)
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.elements.is_disjoint(&other.elements)
    }

    /// The prefix `self ∩ {x < bound}`.
    pub fn below(&self, bound: usize) -> Self {
        self.elements.range(..bound).copied().collect()
    }

    /// Whether `self` and `other` agree on every element smaller than `bound`.
    pub fn agrees_below(&self, other: &Self, bound: usize) -> bool {
        self.elements.range(..bound).eq(other.elements.range(..bound))
    }

    pub fn as_btree(&self) -> &BTreeSet<usize> {
        &self.elements
    }
}

impl Ord for ComparableSet {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.elements.symmetric_difference(&other.elements).next() {
            None => Ordering::Equal,
            Some(smallest) if other.elements.contains(smallest) => Ordering::Less,
            Some(_) => Ordering::Greater,
        }
    }
}

impl PartialOrd for ComparableSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromIterator<usize> for ComparableSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        ComparableSet {
            elements: iter.into_iter().collect(),
        }
    }
}

impl Extend<usize> for ComparableSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl From<BTreeSet<usize>> for ComparableSet {
    fn from(elements: BTreeSet<usize>) -> Self {
        ComparableSet { elements }
    }
}

impl<'a> IntoIterator for &'a ComparableSet {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter().copied()
    }
}

impl fmt::Display for ComparableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "}}")
    }
}
