//! Integration tests for bases and reductions.

use fca_basis::{
    canonical_basis, canonical_direct_basis, dependency_graph, irreducibles_reduction,
    minimal_generators, table, table_intent,
};
use fca_core::{ClosureSystem, ComparableSet, Context, GroundSet, ImplicationalSystem, Rule};
use fca_lattice::{Algorithm, BuildConfig, BuildConfigBuilder, ConceptLattice};
use proptest::prelude::*;
use std::collections::BTreeSet;

const ATTRIBUTES: usize = 5;

fn context_strategy() -> impl Strategy<Value = Context> {
    prop::collection::vec(
        prop::collection::btree_set(0usize..ATTRIBUTES, 0..ATTRIBUTES),
        0..8,
    )
    .prop_map(|rows| {
        let objects: Vec<String> = (0..rows.len()).map(|i| format!("g{}", i)).collect();
        let attributes: Vec<String> = (0..ATTRIBUTES).map(|i| format!("m{}", i)).collect();
        let mut context = Context::with_labels(objects, attributes).unwrap();
        for (object, row) in rows.into_iter().enumerate() {
            for attribute in row {
                context.add_relation(object, attribute).unwrap();
            }
        }
        context
    })
}

fn implications_strategy() -> impl Strategy<Value = ImplicationalSystem> {
    prop::collection::vec(
        (
            prop::collection::btree_set(0usize..ATTRIBUTES, 0..3),
            prop::collection::btree_set(0usize..ATTRIBUTES, 1..3),
        ),
        0..6,
    )
    .prop_map(|rules| {
        let ground = GroundSet::from_labels((0..ATTRIBUTES).map(|i| format!("m{}", i))).unwrap();
        let rules = rules
            .into_iter()
            .map(|(premise, conclusion)| Rule::new(premise.into(), conclusion.into()))
            .collect::<Vec<_>>();
        ImplicationalSystem::try_from((ground, rules)).unwrap()
    })
}

fn same_order(left: &ConceptLattice, right: &ConceptLattice) -> bool {
    left.intents() == right.intents()
        && left.covering_intents().unwrap() == right.covering_intents().unwrap()
}

proptest! {
    #[test]
    fn direct_basis_rebuilds_the_lattice(context in context_strategy()) {
        let lattice = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();
        let basis = canonical_direct_basis(&lattice, context.attributes()).unwrap();

        let rebuilt = ConceptLattice::build(&basis, &BuildConfig::default()).unwrap();
        prop_assert!(same_order(&lattice, &rebuilt));
    }

    #[test]
    fn direct_basis_of_implications_rebuilds_the_lattice(system in implications_strategy()) {
        let lattice = ConceptLattice::build(&system, &BuildConfig::default()).unwrap();
        let basis = canonical_direct_basis(&lattice, system.ground_set()).unwrap();

        let rebuilt = ConceptLattice::build(&basis, &BuildConfig::default()).unwrap();
        prop_assert!(same_order(&lattice, &rebuilt));
        prop_assert!(basis.is_equivalent_to(&system));
    }

    #[test]
    fn canonical_basis_of_implications_is_equivalent(system in implications_strategy()) {
        let lattice = ConceptLattice::build(&system, &BuildConfig::default()).unwrap();
        let canonical = canonical_basis(&lattice, system.ground_set()).unwrap();

        prop_assert!(canonical.is_equivalent_to(&system));
        // The canonical basis has the fewest rules of any equivalent system.
        prop_assert!(canonical.rule_count() <= system.rule_count());
    }

    #[test]
    fn direct_basis_closes_in_one_pass(context in context_strategy()) {
        let lattice = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();
        let basis = canonical_direct_basis(&lattice, context.attributes()).unwrap();

        // Applying every rule once from the original set already gives the closure.
        for set in (0..1usize << ATTRIBUTES).map(|mask| {
            (0..ATTRIBUTES).filter(|i| mask & (1 << i) != 0).collect::<ComparableSet>()
        }) {
            let mut once = set.clone();
            for rule in basis.rules() {
                if rule.premise().is_subset(&set) {
                    once = once.union(rule.conclusion());
                }
            }
            prop_assert_eq!(once, context.closure(&set));
        }
    }

    #[test]
    fn canonical_basis_is_equivalent_and_minimal(context in context_strategy()) {
        let lattice = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();
        let direct = canonical_direct_basis(&lattice, context.attributes()).unwrap();
        let canonical = canonical_basis(&lattice, context.attributes()).unwrap();

        prop_assert!(canonical.is_equivalent_to(&direct));
        prop_assert!(canonical.rule_count() <= direct.rule_count());

        for rule in canonical.rules() {
            // Every premise is closed under the other rules, so no rule is redundant.
            prop_assert_eq!(&canonical.closure_without(rule.premise(), Some(rule)), rule.premise());
            prop_assert!(rule.premise().is_disjoint(rule.conclusion()));
        }
    }

    #[test]
    fn generators_close_to_their_concept(context in context_strategy()) {
        let lattice = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();

        for (id, found) in minimal_generators(&lattice).unwrap() {
            prop_assert!(!found.is_empty());
            for generator in found {
                prop_assert_eq!(&context.closure(&generator), lattice.intent(id));
            }
        }
    }

    #[test]
    fn table_lattice_is_isomorphic(context in context_strategy()) {
        let lattice = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();
        let reduced = table(&lattice).unwrap();
        let rebuilt = ConceptLattice::build(&reduced, &BuildConfig::default()).unwrap();

        let mapped: BTreeSet<ComparableSet> = lattice
            .concepts()
            .map(|(id, _)| table_intent(&lattice, id).unwrap())
            .collect();
        prop_assert_eq!(mapped.len(), lattice.len());
        prop_assert_eq!(&mapped, &rebuilt.intents());
        prop_assert_eq!(rebuilt.edge_count(), lattice.edge_count());
    }

    #[test]
    fn irreducibles_reduction_embeds_the_order(context in context_strategy()) {
        let lattice = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();
        let reduced = irreducibles_reduction(&lattice).unwrap();

        prop_assert!(reduced.len() <= lattice.len());
        prop_assert!(reduced.is_diagram().unwrap());

        let mut order = reduced.clone();
        order.transitive_closure().unwrap();
        for (low, _) in reduced.concepts() {
            for (high, _) in reduced.concepts() {
                if low != high {
                    prop_assert_eq!(order.graph().contains_edge(low, high), lattice.leq(low, high));
                }
            }
        }
    }
}

#[test]
fn test_bordat_lattice_gives_the_same_basis() {
    let mut context = Context::with_labels(["1", "2", "3"], ["a", "b", "c", "d"]).unwrap();
    for (object, attribute) in [
        ("1", "a"),
        ("1", "c"),
        ("2", "a"),
        ("2", "b"),
        ("2", "c"),
        ("2", "d"),
        ("3", "a"),
        ("3", "b"),
    ] {
        context.add_relation_by_label(object, attribute).unwrap();
    }

    let config = BuildConfigBuilder::new().algorithm(Algorithm::Bordat).build();
    let next = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();
    let bordat = ConceptLattice::build(&context, &config).unwrap();

    assert_eq!(
        canonical_basis(&next, context.attributes()).unwrap(),
        canonical_basis(&bordat, context.attributes()).unwrap()
    );
    assert_eq!(
        canonical_direct_basis(&next, context.attributes()).unwrap(),
        canonical_direct_basis(&bordat, context.attributes()).unwrap()
    );
}

#[test]
fn test_dependency_graph_of_implications() {
    let mut system = ImplicationalSystem::from_labels(["a", "b", "c", "d"]).unwrap();
    system.add_rule_by_labels(&["a", "b"], &["c"]).unwrap();
    system.add_rule_by_labels(&["d"], &["a"]).unwrap();
    let lattice = ConceptLattice::build(&system, &BuildConfig::default()).unwrap();

    let graph = dependency_graph(&lattice, system.ground_set()).unwrap();
    let pairs: BTreeSet<(usize, usize)> = graph
        .edges()
        .map(|(s, t, _)| (*graph.node(s).unwrap(), *graph.node(t).unwrap()))
        .collect();

    assert!(pairs.contains(&(0, 2)));
    assert!(pairs.contains(&(1, 2)));
    assert!(pairs.contains(&(3, 0)));
    // Nothing forces d.
    assert!(pairs.iter().all(|&(_, target)| target != 3));
}

#[test]
fn test_basis_round_trips_through_json() {
    let mut system = ImplicationalSystem::from_labels(["a", "b", "c", "d"]).unwrap();
    system.add_rule_by_labels(&["a", "b"], &["c"]).unwrap();
    system.add_rule_by_labels(&["d"], &["a"]).unwrap();
    let lattice = ConceptLattice::build(&system, &BuildConfig::default()).unwrap();
    let basis = canonical_basis(&lattice, system.ground_set()).unwrap();

    let json = serde_json::to_string(&basis).unwrap();
    let parsed: ImplicationalSystem = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, basis);
    assert!(parsed.is_equivalent_to(&system));
}
