//! Ground-set registry.
//!
//! The registry fixes the total order every lectic comparison relies on:
//! the `i`-th registered label is element `i`.

use crate::error::{ClosureError, Result};
use crate::set::ComparableSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered, duplicate-free list of element labels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundSet {
    labels: Vec<String>,
    index: BTreeMap<String, usize>,
}

impl GroundSet {
    pub fn new() -> Self {
        GroundSet {
            labels: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// Build a registry from labels in order.
    pub fn from_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ground = Self::new();
        for label in labels {
            ground.insert(label)?;
        }
        Ok(ground)
    }

    /// Register a new label as the next element.
    pub fn insert(&mut self, label: impl Into<String>) -> Result<usize> {
        let label = label.into();
        if self.index.contains_key(&label) {
            return Err(ClosureError::DuplicateLabel(label));
        }
        let element = self.labels.len();
        self.index.insert(label.clone(), element);
        self.labels.push(label);
        Ok(element)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn label(&self, element: usize) -> Option<&str> {
        self.labels.get(element).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, element: usize) -> bool {
        element < self.labels.len()
    }

    /// The whole ground set as a set.
    pub fn full(&self) -> ComparableSet {
        ComparableSet::full(self.len())
    }

    /// Fail on the first element that is not registered.
    pub fn check(&self, set: &ComparableSet) -> Result<()> {
        match set.iter().find(|e| !self.contains(*e)) {
            Some(index) => Err(ClosureError::UnknownElement {
                index,
                size: self.len(),
            }),
            None => Ok(()),
        }
    }

    /// Resolve labels into a set.
    pub fn set_of(&self, labels: &[&str]) -> Result<ComparableSet> {
        labels
            .iter()
            .map(|label| {
                self.index_of(label)
                    .ok_or_else(|| ClosureError::UnknownLabel(label.to_string()))
            })
            .collect()
    }

    /// Render a set with labels, e.g. `{a, c}`.
    pub fn format(&self, set: &ComparableSet) -> String {
        let labels: Vec<&str> = set
            .iter()
            .map(|e| self.label(e).unwrap_or("?"))
            .collect();
        format!("{{{}}}", labels.join(", "))
    }
}
