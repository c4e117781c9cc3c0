use nalgebra::Vector3;
use tracing::{debug, trace};

use crate::dynamics::rotor;
use crate::dynamics::state::{Deriv, Pose, State};
use crate::error::SimResult;
use crate::sim::config::SimConfig;
use crate::sim::event::Termination;
use crate::sim::integrator::semi_implicit_euler_step;

// Absorbs the rounding in runtime / dt so that 5.0 / 0.02 counts as 250 steps.
const STEP_COUNT_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Rigid-body simulator
// ---------------------------------------------------------------------------

/// Owns the physical state of one quadrotor and advances it one fixed
/// timestep at a time.
#[derive(Debug, Clone)]
pub struct RigidBodySimulator {
    config: SimConfig,
    state: State,
    accel: Deriv,
    steps: u64,
    max_steps: u64,
    termination: Option<Termination>,
}

impl RigidBodySimulator {
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let max_steps = (config.runtime / config.dt - STEP_COUNT_TOLERANCE).ceil().max(1.0) as u64;
        let mut sim = Self {
            state: initial_state(&config),
            config,
            accel: Deriv::zeros(),
            steps: 0,
            max_steps,
            termination: None,
        };
        sim.reset();
        Ok(sim)
    }

    /// Restore the initial conditions and zero the clock.
    pub fn reset(&mut self) {
        self.state = initial_state(&self.config);
        self.accel = Deriv::zeros();
        self.steps = 0;
        self.termination = None;
        debug!(pose = ?self.state.pose.to_array(), "simulator reset");
    }

    /// Advance one timestep under the given rotor speeds (rev/s).
    ///
    /// Returns `true` once the episode is over: the runtime elapsed, the
    /// position left the flight volume, or the airframe hit the ground.
    /// Keeps integrating and returning `true` until [`reset`](Self::reset).
    pub fn next_timestep(&mut self, rotor_speeds: &[f64]) -> SimResult<bool> {
        let speeds = rotor::sanitize(rotor_speeds, &self.config.airframe)?;
        let dt = self.config.dt;
        let bounds = &self.config.bounds;

        let (mut next, accel) = semi_implicit_euler_step(
            &self.state,
            &self.config.airframe,
            self.config.gravity,
            &speeds,
            dt,
        );

        let mut event = None;

        // Inelastic ground contact: stop on the floor
        if next.pose.position.z <= bounds.ground() {
            next.pose.position.z = bounds.ground();
            next.vel = Vector3::zeros();
            next.omega = Vector3::zeros();
            event = Some(Termination::GroundContact);
        } else if let Some(axis) = bounds.violation(&next.pose.position) {
            event = Some(Termination::OutOfBounds { axis });
        }

        self.steps += 1;
        next.time = self.steps as f64 * dt;
        if event.is_none() && self.steps >= self.max_steps {
            event = Some(Termination::TimeLimit);
        }

        self.state = next;
        self.accel = accel;

        trace!(
            t = self.state.time,
            z = self.state.pose.position.z,
            vz = self.state.vel.z,
            "step"
        );

        if self.termination.is_none() {
            if let Some(reason) = event {
                debug!(t = self.state.time, %reason, "episode terminated");
                self.termination = Some(reason);
            }
        }
        Ok(self.is_done())
    }

    pub fn is_done(&self) -> bool {
        self.termination.is_some()
    }

    /// First termination reason since the last reset.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn time(&self) -> f64 {
        self.state.time
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn pose(&self) -> &Pose {
        &self.state.pose
    }

    pub fn velocity(&self) -> &Vector3<f64> {
        &self.state.vel
    }

    pub fn angular_velocity(&self) -> &Vector3<f64> {
        &self.state.omega
    }

    pub fn linear_accel(&self) -> &Vector3<f64> {
        &self.accel.dvel
    }

    pub fn angular_accel(&self) -> &Vector3<f64> {
        &self.accel.domega
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn initial_pose(&self) -> Pose {
        self.config.initial.pose()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

fn initial_state(config: &SimConfig) -> State {
    State {
        time: 0.0,
        pose: config.initial.pose(),
        vel: config.initial.velocity,
        omega: config.initial.angular_velocity,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
