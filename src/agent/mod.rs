pub mod altitude;
pub mod pid;
pub mod random;

pub use altitude::AltitudeHoldAgent;
pub use pid::Pid;
pub use random::RandomAgent;

use crate::dynamics::state::NUM_ROTORS;

/// Trait for rotor-speed policies.
///
/// Implement this to plug a controller or a learned policy into
/// [`crate::sim::run_episode`]. Agents only see the environment state
/// vector, never the simulator.
pub trait Agent {
    /// Choose rotor speeds (rev/s) for the given environment state.
    fn act(&mut self, state: &[f64]) -> [f64; NUM_ROTORS];

    /// Reset internal state at the start of an episode.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Always commands the same rotor speeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantAgent {
    pub speeds: [f64; NUM_ROTORS],
}

impl ConstantAgent {
    pub fn new(speeds: [f64; NUM_ROTORS]) -> Self {
        Self { speeds }
    }

    /// All four rotors at the same speed.
    pub fn uniform(speed: f64) -> Self {
        Self::new([speed; NUM_ROTORS])
    }
}

impl Agent for ConstantAgent {
    fn act(&mut self, _state: &[f64]) -> [f64; NUM_ROTORS] {
        self.speeds
    }

    fn name(&self) -> &str {
        "constant"
    }
}
