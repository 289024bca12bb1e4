//! Concepts: the nodes of a concept lattice.

use crate::set::ComparableSet;
use serde::{Deserialize, Serialize};

static EMPTY: ComparableSet = ComparableSet::new();

/// An (extent, intent) pair.
///
/// Lattices built from an implicational system only know closed sets, so
/// their concepts carry an intent and no extent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Concept {
    extent: Option<ComparableSet>,
    intent: Option<ComparableSet>,
}

impl Concept {
    /// A full concept of a formal context.
    pub fn new(extent: ComparableSet, intent: ComparableSet) -> Self {
        Concept {
            extent: Some(extent),
            intent: Some(intent),
        }
    }

    /// A concept known only by its closed set.
    pub fn closed_set(intent: ComparableSet) -> Self {
        Concept {
            extent: None,
            intent: Some(intent),
        }
    }

    /// A concept known only by its extent.
    pub fn with_extent(extent: ComparableSet) -> Self {
        Concept {
            extent: Some(extent),
            intent: None,
        }
    }

    pub fn extent(&self) -> Option<&ComparableSet> {
        self.extent.as_ref()
    }

    pub fn intent(&self) -> Option<&ComparableSet> {
        self.intent.as_ref()
    }

    /// The intent, or the empty set when it is absent.
    pub fn intent_or_empty(&self) -> &ComparableSet {
        self.intent.as_ref().unwrap_or(&EMPTY)
    }

    pub fn has_extent(&self) -> bool {
        self.extent.is_some()
    }

    pub fn has_intent(&self) -> bool {
        self.intent.is_some()
    }
}
