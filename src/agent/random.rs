use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use super::Agent;
use crate::dynamics::state::NUM_ROTORS;
use crate::error::{SimError, SimResult};

/// Gaussian rotor commands: one shared draw around `mean`, plus a small
/// independent jitter per rotor.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    base: Normal<f64>,
    jitter: Normal<f64>,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(mean: f64, std_dev: f64, jitter: f64, seed: u64) -> SimResult<Self> {
        if !(std_dev.is_finite() && std_dev >= 0.0) {
            return Err(SimError::invalid(format!(
                "std_dev must be non-negative, got {std_dev}"
            )));
        }
        if !(jitter.is_finite() && jitter >= 0.0) {
            return Err(SimError::invalid(format!(
                "jitter must be non-negative, got {jitter}"
            )));
        }
        let base = Normal::new(mean, std_dev)
            .map_err(|e| SimError::invalid(format!("base distribution: {e}")))?;
        let jitter = Normal::new(0.0, jitter)
            .map_err(|e| SimError::invalid(format!("jitter distribution: {e}")))?;
        Ok(Self {
            base,
            jitter,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// N(450, 25) shared thrust, N(0, 1) per-rotor jitter.
    pub fn with_seed(seed: u64) -> SimResult<Self> {
        Self::new(450.0, 25.0, 1.0, seed)
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, _state: &[f64]) -> [f64; NUM_ROTORS] {
        let shared = self.base.sample(&mut self.rng);
        std::array::from_fn(|_| (shared + self.jitter.sample(&mut self.rng)).max(0.0))
    }

    fn name(&self) -> &str {
        "random"
    }
}
