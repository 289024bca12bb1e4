use fca_basis::{canonical_direct_basis, BasisError};
use fca_core::{ClosureError, Context};
use fca_lattice::{Algorithm, BuildConfig, BuildConfigBuilder, ConceptLattice, LatticeError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::time::{Duration, Instant};

/// Statistics collected while stress testing the lattice builders
#[derive(Clone, Debug)]
pub struct StressTestStats {
    pub contexts: usize,
    pub objects: usize,
    pub attributes: usize,
    pub total_concepts: usize,
    pub next_closure_time: Duration,
    pub bordat_time: Duration,
    pub disagreements: usize,
}

impl StressTestStats {
    pub fn concepts_per_second(&self) -> f64 {
        let total = (self.next_closure_time + self.bordat_time).as_secs_f64();
        if total == 0.0 {
            0.0
        } else {
            (2 * self.total_concepts) as f64 / total
        }
    }
}

impl fmt::Display for StressTestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stress Test Statistics")?;
        writeln!(f, "  Contexts:            {}", self.contexts)?;
        writeln!(f, "  Objects x Attributes: {} x {}", self.objects, self.attributes)?;
        writeln!(f, "  Total Concepts:      {}", self.total_concepts)?;
        writeln!(
            f,
            "  Next Closure Time:   {:.3}s",
            self.next_closure_time.as_secs_f64()
        )?;
        writeln!(f, "  Bordat Time:         {:.3}s", self.bordat_time.as_secs_f64())?;
        writeln!(f, "  Concepts/Second:     {:.0}", self.concepts_per_second())?;
        write!(f, "  Disagreements:       {}", self.disagreements)
    }
}

/// Random context with each incidence present with probability `density`.
pub fn random_context(
    rng: &mut StdRng,
    objects: usize,
    attributes: usize,
    density: f64,
) -> Result<Context, ClosureError> {
    let mut context = Context::with_labels(
        (0..objects).map(|g| format!("g{}", g)),
        (0..attributes).map(|m| format!("m{}", m)),
    )?;
    for object in 0..objects {
        for attribute in 0..attributes {
            if rng.gen_bool(density.clamp(0.0, 1.0)) {
                context.add_relation(object, attribute)?;
            }
        }
    }
    Ok(context)
}

fn timed(
    context: &Context,
    config: &BuildConfig,
) -> Result<(ConceptLattice, Duration), LatticeError> {
    let start = Instant::now();
    let lattice = ConceptLattice::build(context, config)?;
    Ok((lattice, start.elapsed()))
}

/// Whether two lattices have the same intents and covering pairs.
pub fn same_order(left: &ConceptLattice, right: &ConceptLattice) -> Result<bool, LatticeError> {
    Ok(left.intents() == right.intents() && left.covering_intents()? == right.covering_intents()?)
}

/// Build both lattices of `contexts` seeded random contexts and compare
/// them with each other and with the lattice of their canonical direct
/// basis.
pub fn stress_test_builders(
    seed: u64,
    contexts: usize,
    objects: usize,
    attributes: usize,
    density: f64,
) -> Result<StressTestStats, BasisError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let next_config = BuildConfig::default();
    let bordat_config = BuildConfigBuilder::new().algorithm(Algorithm::Bordat).build();

    let mut stats = StressTestStats {
        contexts,
        objects,
        attributes,
        total_concepts: 0,
        next_closure_time: Duration::ZERO,
        bordat_time: Duration::ZERO,
        disagreements: 0,
    };

    for round in 0..contexts {
        let context = random_context(&mut rng, objects, attributes, density)?;

        let (next, next_time) = timed(&context, &next_config)?;
        let (bordat, bordat_time) = timed(&context, &bordat_config)?;
        stats.next_closure_time += next_time;
        stats.bordat_time += bordat_time;
        stats.total_concepts += next.len();

        let basis = canonical_direct_basis(&next, context.attributes())?;
        let rebuilt = ConceptLattice::build(&basis, &next_config)?;

        if !same_order(&next, &bordat)? || !same_order(&next, &rebuilt)? {
            tracing::warn!(round, seed, "lattice builders disagree");
            stats.disagreements += 1;
        }
    }

    tracing::debug!(
        contexts,
        concepts = stats.total_concepts,
        disagreements = stats.disagreements,
        "stress test finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fca_basis::canonical_basis;
    use fca_core::ClosureSystem;

    #[test]
    fn test_builders_agree_on_sparse_contexts() {
        let stats = stress_test_builders(7, 20, 12, 8, 0.3).unwrap();

        assert_eq!(stats.contexts, 20);
        assert!(stats.total_concepts >= 20);
        assert_eq!(stats.disagreements, 0);
    }

    #[test]
    fn test_builders_agree_on_dense_contexts() {
        let stats = stress_test_builders(42, 10, 16, 10, 0.6).unwrap();
        assert_eq!(stats.disagreements, 0);
        assert!(stats.to_string().contains("Disagreements:       0"));
    }

    #[test]
    fn test_same_seed_same_context() {
        let first = random_context(&mut StdRng::seed_from_u64(3), 6, 6, 0.5).unwrap();
        let second = random_context(&mut StdRng::seed_from_u64(3), 6, 6, 0.5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_canonical_basis_on_random_contexts() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = BuildConfigBuilder::new().algorithm(Algorithm::Bordat).build();

        for _ in 0..10 {
            let context = random_context(&mut rng, 10, 7, 0.4).unwrap();
            let lattice = ConceptLattice::build(&context, &config).unwrap();
            let basis = canonical_basis(&lattice, context.attributes()).unwrap();

            let rebuilt = ConceptLattice::build(&basis, &config).unwrap();
            assert!(same_order(&lattice, &rebuilt).unwrap());
            for rule in basis.rules() {
                let closed = rule.premise().union(rule.conclusion());
                assert_eq!(context.closure(rule.premise()), closed);
            }
        }
    }

    #[test]
    fn test_budget_stops_large_contexts() {
        let mut rng = StdRng::seed_from_u64(5);
        let context = random_context(&mut rng, 30, 14, 0.5).unwrap();
        let config = BuildConfigBuilder::new().max_concepts(16).build();

        assert!(ConceptLattice::build(&context, &config).is_err());
    }
}
