//! Implicational systems.
//!
//! An implicational system is a set of rules `premise -> conclusion` over a
//! ground set. The closure of a set saturates it: every rule whose premise
//! is contained in the current set adds its conclusion, until a full pass
//! over the rules adds nothing.

use crate::closure::ClosureSystem;
use crate::error::{ClosureError, Result};
use crate::ground::GroundSet;
use crate::set::ComparableSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// An implication `premise -> conclusion`.
///
/// Rules order by premise (lectically), then by conclusion.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rule {
    premise: ComparableSet,
    conclusion: ComparableSet,
}

impl Rule {
    pub fn new(premise: ComparableSet, conclusion: ComparableSet) -> Self {
        Rule {
            premise,
            conclusion,
        }
    }

    pub fn premise(&self) -> &ComparableSet {
        &self.premise
    }

    pub fn conclusion(&self) -> &ComparableSet {
        &self.conclusion
    }

    /// Premise and conclusion are disjoint and the conclusion is non-empty.
    pub fn is_proper(&self) -> bool {
        !self.conclusion.is_empty() && self.premise.is_disjoint(&self.conclusion)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.premise, self.conclusion)
    }
}

/// A set of rules over a ground set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplicationalSystem {
    ground: GroundSet,
    rules: BTreeSet<Rule>,
}

impl ImplicationalSystem {
    /// An empty system over `ground`.
    pub fn new(ground: GroundSet) -> Self {
        ImplicationalSystem {
            ground,
            rules: BTreeSet::new(),
        }
    }

    pub fn from_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(GroundSet::from_labels(labels)?))
    }

    /// Register one more ground element.
    pub fn add_element(&mut self, label: impl Into<String>) -> Result<usize> {
        self.ground.insert(label)
    }

    /// Add a rule. Returns `Ok(false)` if it was already present.
    pub fn add_rule(&mut self, rule: Rule) -> Result<bool> {
        self.ground.check(&rule.premise)?;
        self.ground.check(&rule.conclusion)?;
        Ok(self.rules.insert(rule))
    }

    pub fn add_rule_by_labels(&mut self, premise: &[&str], conclusion: &[&str]) -> Result<bool> {
        let rule = Rule::new(self.ground.set_of(premise)?, self.ground.set_of(conclusion)?);
        self.add_rule(rule)
    }

    pub fn remove_rule(&mut self, rule: &Rule) -> bool {
        self.rules.remove(rule)
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn contains_rule(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }

    /// Saturate `set` with every rule except `skip`.
    ///
    /// Each pass scans all rules; a pass that fires adds at least one
    /// ground element, so at most `|S| + 1` passes run.
    pub fn closure_without(&self, set: &ComparableSet, skip: Option<&Rule>) -> ComparableSet {
        let mut current = set.clone();

        for _ in 0..=self.ground.len() {
            let mut fired = false;
            for rule in self.rules.iter().filter(|r| Some(*r) != skip) {
                if rule.premise.is_subset(&current) && !rule.conclusion.is_subset(&current) {
                    current = current.union(&rule.conclusion);
                    fired = true;
                }
            }
            if !fired {
                break;
            }
        }

        current
    }

    /// Whether `rule` follows from this system.
    pub fn implies(&self, rule: &Rule) -> bool {
        rule.conclusion.is_subset(&self.closure(&rule.premise))
    }

    /// Same ground set size and each system implies every rule of the other.
    pub fn is_equivalent_to(&self, other: &ImplicationalSystem) -> bool {
        self.ground.len() == other.ground.len()
            && other.rules().all(|rule| self.implies(rule))
            && self.rules().all(|rule| other.implies(rule))
    }

    /// Remove premise elements from conclusions and drop empty rules.
    /// Returns the number of rules rewritten or dropped.
    pub fn make_proper(&mut self) -> usize {
        self.rewrite(|_, rule| {
            let conclusion = rule.conclusion.difference(&rule.premise);
            (!conclusion.is_empty()).then(|| Rule::new(rule.premise.clone(), conclusion))
        })
    }

    /// Merge rules with the same premise into one.
    /// Returns the number of rules removed.
    pub fn make_compact(&mut self) -> usize {
        let before = self.rules.len();
        let mut merged: BTreeMap<ComparableSet, ComparableSet> = BTreeMap::new();
        for rule in &self.rules {
            let entry = merged.entry(rule.premise.clone()).or_default();
            *entry = entry.union(&rule.conclusion);
        }
        self.rules = merged
            .into_iter()
            .map(|(premise, conclusion)| Rule::new(premise, conclusion))
            .collect();
        before - self.rules.len()
    }

    /// Replace every conclusion with the closure of its premise.
    /// Returns the number of rules changed.
    pub fn make_right_maximal(&mut self) -> usize {
        let changed = self.rewrite(|system, rule| {
            Some(Rule::new(rule.premise.clone(), system.closure(&rule.premise)))
        });
        self.make_compact();
        changed
    }

    /// Apply `f` to every rule; `None` drops the rule.
    fn rewrite<F>(&mut self, f: F) -> usize
    where
        F: Fn(&ImplicationalSystem, &Rule) -> Option<Rule>,
    {
        let mut changed = 0;
        let mut rewritten = BTreeSet::new();
        for rule in &self.rules {
            match f(self, rule) {
                Some(new_rule) => {
                    if new_rule != *rule {
                        changed += 1;
                    }
                    rewritten.insert(new_rule);
                }
                None => changed += 1,
            }
        }
        self.rules = rewritten;
        changed
    }

    /// Render a rule with labels, e.g. `{a, b} -> {c}`.
    pub fn format_rule(&self, rule: &Rule) -> String {
        format!(
            "{} -> {}",
            self.ground.format(&rule.premise),
            self.ground.format(&rule.conclusion)
        )
    }
}

impl ClosureSystem for ImplicationalSystem {
    fn ground_set(&self) -> &GroundSet {
        &self.ground
    }

    fn closure(&self, set: &ComparableSet) -> ComparableSet {
        self.closure_without(set, None)
    }
}

impl fmt::Display for ImplicationalSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", self.format_rule(rule))?;
        }
        Ok(())
    }
}

impl TryFrom<(GroundSet, Vec<Rule>)> for ImplicationalSystem {
    type Error = ClosureError;

    fn try_from((ground, rules): (GroundSet, Vec<Rule>)) -> Result<Self> {
        let mut system = ImplicationalSystem::new(ground);
        for rule in rules {
            system.add_rule(rule)?;
        }
        Ok(system)
    }
}
