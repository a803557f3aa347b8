pub mod circular;
pub mod force_atlas2;
pub mod random;
pub mod simple_force;

use crate::error::{Error, Result};
use crate::graph::{Body, Spring};
use std::str::FromStr;
use std::sync::Arc;

pub use force_atlas2::{ForceAtlas2, ForceAtlas2Settings};
pub use simple_force::SimpleForce;

/// Iteration count shared by both force strategies.
pub const DEFAULT_ITERATIONS: usize = 50;

/// An iterative physics simulation that moves bodies in place.
///
/// The delegated strategy hands its seeded bodies to an implementation of this trait, so the
/// physics can be swapped (or stubbed in tests) without touching the rest of the engine.
pub trait IterativeLayout: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn run(&self, bodies: &mut [Body], springs: &[Spring], iterations: usize);
}

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Independent uniform coordinates in `[-200, 200)²`.
    Random(RandomOptions),
    /// Insertion order around a circle of radius `max(80, 20 * n)`.
    Circular,
    /// Pairwise repulsion plus spring attraction, damped.
    SimpleForce(SimpleForceOptions),
    /// Seeded positions handed to an external simulation (ForceAtlas2 by default).
    Delegated(DelegatedOptions),
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::SimpleForce(SimpleForceOptions::default())
    }
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Random(_) => "random",
            Algorithm::Circular => "circular",
            Algorithm::SimpleForce(_) => "simple-force",
            Algorithm::Delegated(_) => "force-atlas2",
        }
    }

    /// Fixes the random seed of strategies that use randomness.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        match &mut self {
            Algorithm::Random(o) => o.seed = seed,
            Algorithm::SimpleForce(o) => o.seed = seed,
            Algorithm::Delegated(o) => o.seed = seed,
            Algorithm::Circular => {}
        }
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        match &mut self {
            Algorithm::SimpleForce(o) => o.iterations = iterations,
            Algorithm::Delegated(o) => o.iterations = iterations,
            Algorithm::Random(_) | Algorithm::Circular => {}
        }
        self
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let algorithm = match s.trim().to_ascii_lowercase().as_str() {
            "random" => Algorithm::Random(RandomOptions::default()),
            "circular" => Algorithm::Circular,
            "simple-force" | "force" => Algorithm::SimpleForce(SimpleForceOptions::default()),
            "force-atlas2" | "forceatlas2" | "fa2" => {
                Algorithm::Delegated(DelegatedOptions::default())
            }
            _ => {
                return Err(Error::UnknownAlgorithm {
                    name: s.to_string(),
                });
            }
        };
        Ok(algorithm)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RandomOptions {
    /// `None` seeds from OS entropy, so repeated runs differ.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct SimpleForceOptions {
    pub iterations: usize,
    pub seed: Option<u64>,
    pub physics: SimpleForce,
}

impl Default for SimpleForceOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            physics: SimpleForce::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DelegatedOptions {
    /// `None` means the collaborator is unavailable; the simple force strategy runs instead.
    pub collaborator: Option<Arc<dyn IterativeLayout>>,
    pub iterations: usize,
    pub seed: Option<u64>,
}

impl Default for DelegatedOptions {
    fn default() -> Self {
        Self {
            collaborator: Some(Arc::new(ForceAtlas2::default())),
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}
