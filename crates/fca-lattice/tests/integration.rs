//! Integration tests for lattice construction.

use fca_core::{ComparableSet, Context, GroundSet, ImplicationalSystem, Rule};
use fca_lattice::{
    immediate_successors, Algorithm, BuildConfig, BuildConfigBuilder, ConceptLattice,
    LatticeError,
};
use proptest::prelude::*;

/// Objects {1, 2, 3}, attributes {a, b, c, d}.
fn sample_context() -> Context {
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
    context
}

fn bordat_config() -> BuildConfig {
    BuildConfigBuilder::new().algorithm(Algorithm::Bordat).build()
}

#[test]
fn test_successor_of_ab_is_full_attribute_set() {
    let context = sample_context();
    let ab = context.attributes().set_of(&["a", "b"]).unwrap();
    let full = context.attributes().full();

    let successors = immediate_successors(&context, &ab).unwrap();
    assert!(successors.contains(&full));
    assert_eq!(successors, vec![full]);
}

#[test]
fn test_sample_context_lattice() {
    let context = sample_context();

    for config in [BuildConfig::default(), bordat_config()] {
        let lattice = ConceptLattice::build(&context, &config).unwrap();
        assert_eq!(lattice.len(), 4);
        assert_eq!(lattice.edge_count(), 4);

        let bottom = lattice.bottom().unwrap();
        let top = lattice.top().unwrap();
        assert_eq!(context.attributes().format(lattice.intent(bottom)), "{a}");
        assert_eq!(lattice.intent(top), &context.attributes().full());

        // The concept {a, b} is shared by objects 2 and 3.
        let ab = context.attributes().set_of(&["a", "b"]).unwrap();
        let id = lattice.find(&ab).unwrap();
        let extent = lattice.concept(id).and_then(|c| c.extent()).unwrap();
        assert_eq!(context.objects().format(extent), "{2, 3}");
    }
}

#[test]
fn test_builders_agree_on_sample_context() {
    let context = sample_context();
    let next = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();
    let bordat = ConceptLattice::build(&context, &bordat_config()).unwrap();

    assert_eq!(next.intents(), bordat.intents());
    assert_eq!(
        next.covering_intents().unwrap(),
        bordat.covering_intents().unwrap()
    );
}

#[test]
fn test_irreducibles_of_sample_context() {
    let context = sample_context();
    let lattice = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();

    let joins = lattice.join_irreducibles().unwrap();
    let meets = lattice.meet_irreducibles().unwrap();

    // Only {a, b} and {a, c} have a single cover on either side.
    assert_eq!(joins.len(), 2);
    assert_eq!(meets.len(), 2);
    assert_eq!(joins, meets);
}

#[test]
fn test_budget_applies_to_both_builders() {
    let system = ImplicationalSystem::from_labels(["a", "b", "c", "d"]).unwrap();

    for algorithm in [Algorithm::NextClosure, Algorithm::Bordat] {
        let config = BuildConfigBuilder::new()
            .algorithm(algorithm)
            .max_concepts(10)
            .build();
        assert_eq!(
            ConceptLattice::build(&system, &config).err(),
            Some(LatticeError::BudgetExceeded { limit: 10 })
        );
    }
}

#[test]
fn test_lattice_round_trips_through_json() {
    let lattice = ConceptLattice::build(&sample_context(), &BuildConfig::default()).unwrap();

    let json = serde_json::to_string(&lattice).unwrap();
    let back: ConceptLattice = serde_json::from_str(&json).unwrap();

    assert_eq!(back.intents(), lattice.intents());
    assert_eq!(back.edge_count(), lattice.edge_count());
}

const ELEMENTS: usize = 5;

fn context_strategy() -> impl Strategy<Value = Context> {
    prop::collection::vec(prop::collection::btree_set(0usize..ELEMENTS, 0..ELEMENTS), 0..8)
        .prop_map(|rows| {
            let objects: Vec<String> = (0..rows.len()).map(|i| format!("g{}", i)).collect();
            let attributes: Vec<String> = (0..ELEMENTS).map(|i| format!("m{}", i)).collect();
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
            prop::collection::btree_set(0usize..ELEMENTS, 0..3),
            prop::collection::btree_set(0usize..ELEMENTS, 1..3),
        ),
        0..6,
    )
    .prop_map(|rules| {
        let ground = GroundSet::from_labels((0..ELEMENTS).map(|i| format!("m{}", i))).unwrap();
        let rules = rules
            .into_iter()
            .map(|(premise, conclusion)| Rule::new(premise.into(), conclusion.into()))
            .collect::<Vec<_>>();
        ImplicationalSystem::try_from((ground, rules)).unwrap()
    })
}

proptest! {
    #[test]
    fn builders_agree_on_contexts(context in context_strategy()) {
        let next = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();
        let bordat = ConceptLattice::build(&context, &bordat_config()).unwrap();

        prop_assert_eq!(next.len(), bordat.len());
        prop_assert_eq!(next.edge_count(), bordat.edge_count());
        prop_assert_eq!(next.intents(), bordat.intents());
        prop_assert_eq!(next.covering_intents().unwrap(), bordat.covering_intents().unwrap());
    }

    #[test]
    fn builders_agree_on_implications(system in implications_strategy()) {
        let next = ConceptLattice::build(&system, &BuildConfig::default()).unwrap();
        let bordat = ConceptLattice::build(&system, &bordat_config()).unwrap();

        prop_assert_eq!(next.intents(), bordat.intents());
        prop_assert_eq!(next.covering_intents().unwrap(), bordat.covering_intents().unwrap());
    }

    #[test]
    fn every_intent_is_closed(system in implications_strategy()) {
        use fca_core::ClosureSystem;
        let lattice = ConceptLattice::build(&system, &bordat_config()).unwrap();

        for intent in lattice.intents() {
            prop_assert!(system.is_closed(&intent));
        }
        prop_assert!(lattice.is_diagram().unwrap());
    }

    #[test]
    fn full_order_reduces_to_diagram(context in context_strategy()) {
        let config = BuildConfigBuilder::new().diagram(false).build();
        let mut full = ConceptLattice::build(&context, &config).unwrap();
        let diagram = ConceptLattice::build(&context, &BuildConfig::default()).unwrap();

        full.transitive_reduction().unwrap();
        prop_assert_eq!(full.edge_count(), diagram.edge_count());
        prop_assert_eq!(full.covering_intents().unwrap(), diagram.covering_intents().unwrap());
    }
}

#[test]
fn test_empty_ground_set_has_single_concept() {
    let system = ImplicationalSystem::new(GroundSet::new());

    for config in [BuildConfig::default(), bordat_config()] {
        let lattice = ConceptLattice::build(&system, &config).unwrap();
        assert_eq!(lattice.len(), 1);
        assert_eq!(lattice.intent(lattice.top().unwrap()), &ComparableSet::new());
    }
}
