//! Minimal generators.
//!
//! A subset `G` of a closed set `C` generates `C` exactly when it is not
//! contained in any lower cover of `C`. The minimal generators of `C` are
//! therefore the minimal transversals of the family `{C \ F}` over the
//! lower covers `F`. The bottom concept has no lower covers and is
//! generated by the empty set.
//!
//! Minimality is by inclusion, not cardinality: a concept may have
//! generators of different sizes, and all of them are returned. Dropping
//! any element of a generator yields a set with a smaller closure. The
//! canonical direct basis needs every such generator as a premise.

use crate::error::Result;
use fca_core::ComparableSet;
use fca_graph::NodeId;
use fca_lattice::ConceptLattice;
use std::collections::{BTreeMap, BTreeSet};

/// Minimal generators of every concept, each list in lectic order.
pub fn minimal_generators(
    lattice: &ConceptLattice,
) -> Result<BTreeMap<NodeId, Vec<ComparableSet>>> {
    let covers = lattice.covers()?;
    let mut generators = BTreeMap::new();

    for (id, _) in lattice.concepts() {
        let intent = lattice.intent(id);
        let family: Vec<ComparableSet> = covers
            .lower(id)
            .iter()
            .map(|low| intent.difference(lattice.intent(*low)))
            .collect();

        let found = minimal_transversals(&family);
        tracing::trace!(concept = %id, generators = found.len(), "minimal generators");
        generators.insert(id, found);
    }

    tracing::debug!(concepts = generators.len(), "minimal generators computed");
    Ok(generators)
}

/// Minimal sets meeting every member of `family`, in lectic order.
///
/// Berge's incremental construction: each new member either is already
/// hit by a partial transversal or extends it by one of its elements,
/// after which non-minimal candidates are dropped.
pub fn minimal_transversals(family: &[ComparableSet]) -> Vec<ComparableSet> {
    let mut transversals: BTreeSet<ComparableSet> = BTreeSet::from([ComparableSet::new()]);

    for member in family {
        let mut extended = BTreeSet::new();
        for partial in &transversals {
            if !partial.is_disjoint(member) {
                extended.insert(partial.clone());
                continue;
            }
            for element in member.iter() {
                let mut grown = partial.clone();
                grown.insert(element);
                extended.insert(grown);
            }
        }
        transversals = minimal_only(extended);
    }

    transversals.into_iter().collect()
}

fn minimal_only(sets: BTreeSet<ComparableSet>) -> BTreeSet<ComparableSet> {
    sets.iter()
        .filter(|set| !sets.iter().any(|other| other.is_proper_subset(set)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fca_core::ImplicationalSystem;
    use fca_lattice::BuildConfig;

    fn set(elements: &[usize]) -> ComparableSet {
        elements.iter().copied().collect()
    }

    #[test]
    fn test_transversals_of_empty_family() {
        assert_eq!(minimal_transversals(&[]), vec![ComparableSet::new()]);
    }

    #[test]
    fn test_transversals() {
        let family = [set(&[2, 3]), set(&[1, 3])];
        let found = minimal_transversals(&family);

        assert_eq!(found.len(), 2);
        assert!(found.contains(&set(&[3])));
        assert!(found.contains(&set(&[1, 2])));
    }

    #[test]
    fn test_free_system_generates_itself() {
        let system = ImplicationalSystem::from_labels(["a", "b", "c"]).unwrap();
        let lattice = ConceptLattice::build(&system, &BuildConfig::default()).unwrap();
        let generators = minimal_generators(&lattice).unwrap();

        // With no rules every closed set is its own only minimal generator.
        for (id, found) in &generators {
            assert_eq!(found, &vec![lattice.intent(*id).clone()]);
        }
    }

    #[test]
    fn test_generators_close_to_their_concept() {
        use fca_core::ClosureSystem;

        let mut system = ImplicationalSystem::from_labels(["a", "b", "c"]).unwrap();
        system.add_rule_by_labels(&["a"], &["b"]).unwrap();
        system.add_rule_by_labels(&["b", "c"], &["a"]).unwrap();
        let lattice = ConceptLattice::build(&system, &BuildConfig::default()).unwrap();

        for (id, found) in minimal_generators(&lattice).unwrap() {
            for generator in found {
                assert_eq!(&system.closure(&generator), lattice.intent(id));
                for element in generator.iter() {
                    let mut smaller = generator.clone();
                    smaller.remove(element);
                    assert_ne!(&system.closure(&smaller), lattice.intent(id));
                }
            }
        }
    }

    #[test]
    fn test_generators_of_different_sizes() {
        let mut system = ImplicationalSystem::from_labels(["a", "b", "c"]).unwrap();
        system.add_rule_by_labels(&["a"], &["b", "c"]).unwrap();
        system.add_rule_by_labels(&["b", "c"], &["a"]).unwrap();
        let lattice = ConceptLattice::build(&system, &BuildConfig::default()).unwrap();

        let top = lattice.top().unwrap();
        let generators = minimal_generators(&lattice).unwrap();
        // Lectic order puts {b, c} before {a}.
        assert_eq!(generators[&top], vec![set(&[1, 2]), set(&[0])]);
    }
}
