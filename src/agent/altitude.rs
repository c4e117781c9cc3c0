use super::pid::Pid;
use super::Agent;
use crate::dynamics::state::{NUM_ROTORS, POSE_SIZE};
use crate::sim::config::SimConfig;
use crate::vehicle::Airframe;

// ---------------------------------------------------------------------------
// Altitude hold: PID on z error, collective thrust only
// ---------------------------------------------------------------------------

/// Baseline controller that drives z toward the task target with equal
/// rotor speeds. Attitude is left alone.
#[derive(Debug, Clone)]
pub struct AltitudeHoldAgent {
    pub pid: Pid,
    airframe: Airframe,
    gravity: f64,
    target_z: f64,
    period: f64, // s between decisions
}

impl AltitudeHoldAgent {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            pid: Pid::new(2.0, 0.5, 1.5),
            airframe: config.airframe.clone(),
            gravity: config.gravity,
            target_z: config.task.target.z,
            period: config.dt * config.task.action_repeat as f64,
        }
    }

    /// Per-rotor speed that produces `accel` (m/s^2) of upward acceleration
    /// on top of gravity compensation.
    fn collective_speed(&self, accel: f64) -> f64 {
        let a = &self.airframe;
        let thrust = a.mass * (self.gravity + accel).max(0.0) / NUM_ROTORS as f64;
        if a.thrust_coeff <= 0.0 {
            return a.rotor_max;
        }
        (thrust / a.thrust_coeff).sqrt().clamp(a.rotor_min, a.rotor_max)
    }
}

impl Agent for AltitudeHoldAgent {
    fn act(&mut self, state: &[f64]) -> [f64; NUM_ROTORS] {
        // Latest pose is the last chunk of the state vector
        let z = match state.len().checked_sub(POSE_SIZE) {
            Some(start) => state[start + 2],
            None => return [self.collective_speed(0.0); NUM_ROTORS],
        };
        let u = self.pid.update(self.target_z - z, self.period);
        [self.collective_speed(u); NUM_ROTORS]
    }

    fn reset(&mut self) {
        self.pid.reset();
    }

    fn name(&self) -> &str {
        "altitude-hold"
    }
}
