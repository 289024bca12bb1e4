//! Configuration for lattice construction.

use serde::{Deserialize, Serialize};

/// Which construction algorithm to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Enumerate closed sets in lectic order, then derive the edges.
    #[default]
    NextClosure,

    /// Expand covering successors from the bottom closed set.
    Bordat,
}

/// Configuration for building a concept lattice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Construction algorithm.
    pub algorithm: Algorithm,

    /// Keep only covering edges (Next Closure only; Bordat always
    /// produces the Hasse diagram).
    pub diagram: bool,

    /// Abort once more than this many concepts have been produced.
    pub max_concepts: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            algorithm: Algorithm::NextClosure,
            diagram: true,
            max_concepts: None,
        }
    }
}

impl BuildConfig {
    /// Whether `count` concepts are still within the budget.
    pub(crate) fn allows(&self, count: usize) -> bool {
        self.max_concepts.map(|limit| count <= limit).unwrap_or(true)
    }
}

/// Builder for build configuration.
pub struct BuildConfigBuilder {
    config: BuildConfig,
}

impl BuildConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: BuildConfig::default(),
        }
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    pub fn diagram(mut self, enabled: bool) -> Self {
        self.config.diagram = enabled;
        self
    }

    pub fn max_concepts(mut self, limit: usize) -> Self {
        self.config.max_concepts = Some(limit);
        self
    }

    pub fn build(self) -> BuildConfig {
        self.config
    }
}

impl Default for BuildConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
