//! Implication bases read off a concept lattice.
//!
//! Both bases are returned as an [`ImplicationalSystem`] over the ground
//! set the lattice was built from, so their closed-set lattice can be
//! rebuilt and compared with the original.

use crate::error::Result;
use crate::generators::minimal_generators;
use fca_core::{ClosureSystem, ComparableSet, GroundSet, ImplicationalSystem, Rule};
use fca_lattice::ConceptLattice;
use std::collections::BTreeMap;

/// Canonical direct basis.
///
/// One rule `g -> C \ g` per concept `C` and minimal generator `g`, minus
/// every element already in the closure of a minimal generator strictly
/// inside `g`. Rules left with an empty conclusion are dropped.
///
/// Conclusions are therefore not `closure(g) \ g`: when `{} -> {a}` holds,
/// the generator `{d}` of `{a, b, c, d}` yields `{d} -> {b, c}`, since `a`
/// already follows from `{}`. This is the proper-premise basis; applying
/// every rule once still closes any set.
pub fn canonical_direct_basis(
    lattice: &ConceptLattice,
    ground: &GroundSet,
) -> Result<ImplicationalSystem> {
    let generators = minimal_generators(lattice)?;

    // Each set is the minimal generator of exactly one concept.
    let closure_of: BTreeMap<&ComparableSet, &ComparableSet> = generators
        .iter()
        .flat_map(|(id, found)| found.iter().map(move |g| (g, lattice.intent(*id))))
        .collect();

    let mut basis = ImplicationalSystem::new(ground.clone());
    for (&generator, &intent) in &closure_of {
        let mut conclusion = intent.difference(generator);
        for (&smaller, &closed) in &closure_of {
            if smaller.is_proper_subset(generator) {
                conclusion = conclusion.difference(closed);
            }
        }
        if !conclusion.is_empty() {
            basis.add_rule(Rule::new(generator.clone(), conclusion))?;
        }
    }

    tracing::debug!(rules = basis.rule_count(), "canonical direct basis computed");
    Ok(basis)
}

/// Canonical (Duquenne–Guigues) basis.
///
/// Starting from the canonical direct basis made right-maximal, each rule
/// in turn is taken out and its premise replaced by its closure under the
/// remaining rules; the rule is dropped if that closure already holds the
/// conclusion. The surviving premises are the pseudo-closed sets, and the
/// rules are presented as `P -> closure(P) \ P`.
pub fn canonical_basis(
    lattice: &ConceptLattice,
    ground: &GroundSet,
) -> Result<ImplicationalSystem> {
    let mut basis = canonical_direct_basis(lattice, ground)?;
    basis.make_right_maximal();

    let rules: Vec<Rule> = basis.rules().cloned().collect();
    for rule in rules {
        if !basis.remove_rule(&rule) {
            continue;
        }
        let premise = basis.closure(rule.premise());
        if !rule.conclusion().is_subset(&premise) {
            basis.add_rule(Rule::new(premise, rule.conclusion().clone()))?;
        }
    }

    basis.make_compact();
    basis.make_proper();
    tracing::debug!(rules = basis.rule_count(), "canonical basis computed");
    Ok(basis)
}
