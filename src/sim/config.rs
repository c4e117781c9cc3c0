use std::path::Path;

use nalgebra::Vector3;
use serde::Deserialize;

use crate::dynamics::state::{Pose, G0, POSE_SIZE};
use crate::error::{SimError, SimResult};
use crate::sim::event::Axis;
use crate::vehicle::Airframe;

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

/// Everything needed to build a simulator and its task wrapper.
///
/// Every field has a default, so a scenario file only lists what it changes:
///
/// ```toml
/// runtime = 10.0
///
/// [initial]
/// pose = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
///
/// [task]
/// target = [0.0, 0.0, 100.0]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub dt: f64,      // integration timestep, s
    pub runtime: f64, // episode time limit, s
    pub gravity: f64, // m/s^2, acts along world −Z
    pub airframe: Airframe,
    pub initial: InitialConditions,
    pub bounds: FlightVolume,
    pub task: TaskConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 50.0, // 50 Hz
            runtime: 5.0,
            gravity: G0,
            airframe: Airframe::default(),
            initial: InitialConditions::default(),
            bounds: FlightVolume::default(),
            task: TaskConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(s: &str) -> SimResult<Self> {
        let config: SimConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading scenario");
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::invalid(format!("dt must be positive, got {}", self.dt)));
        }
        if !(self.runtime.is_finite() && self.runtime > 0.0) {
            return Err(SimError::invalid(format!(
                "runtime must be positive, got {}",
                self.runtime
            )));
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(SimError::invalid(format!(
                "gravity must be non-negative, got {}",
                self.gravity
            )));
        }
        self.airframe.validate()?;
        self.bounds.validate()?;
        if self.task.action_repeat == 0 {
            return Err(SimError::invalid("action_repeat must be at least 1"));
        }
        let init = &self.initial;
        let all_finite = init.pose.iter().all(|v| v.is_finite())
            && init.velocity.iter().all(|v| v.is_finite())
            && init.angular_velocity.iter().all(|v| v.is_finite())
            && self.task.target.iter().all(|v| v.is_finite());
        if !all_finite {
            return Err(SimError::invalid("initial conditions and target must be finite"));
        }
        let start = self.initial.pose().position;
        if let Some(axis) = self.bounds.violation(&start) {
            return Err(SimError::invalid(format!(
                "initial position ({}, {}, {}) lies outside the flight volume on {axis:?}",
                start.x, start.y, start.z
            )));
        }
        Ok(())
    }

    // Builder-style overrides for programmatic setups.
    pub fn with_initial_pose(mut self, pose: [f64; POSE_SIZE]) -> Self { self.initial.pose = pose; self }
    pub fn with_initial_velocity(mut self, v: Vector3<f64>) -> Self { self.initial.velocity = v; self }
    pub fn with_initial_angular_velocity(mut self, w: Vector3<f64>) -> Self { self.initial.angular_velocity = w; self }
    pub fn with_runtime(mut self, runtime: f64) -> Self { self.runtime = runtime; self }
    pub fn with_dt(mut self, dt: f64) -> Self { self.dt = dt; self }
    pub fn with_action_repeat(mut self, n: usize) -> Self { self.task.action_repeat = n; self }
    pub fn with_target(mut self, target: Vector3<f64>) -> Self { self.task.target = target; self }
    pub fn with_airframe(mut self, airframe: Airframe) -> Self { self.airframe = airframe; self }
    pub fn with_bounds(mut self, bounds: FlightVolume) -> Self { self.bounds = bounds; self }
}

// ---------------------------------------------------------------------------
// Initial conditions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialConditions {
    pub pose: [f64; POSE_SIZE],            // [x, y, z, phi, theta, psi]
    pub velocity: Vector3<f64>,            // m/s, world frame
    pub angular_velocity: Vector3<f64>,    // rad/s, body frame
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            pose: [0.0, 0.0, 10.0, 0.0, 0.0, 0.0],
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl InitialConditions {
    pub fn pose(&self) -> Pose {
        Pose::from_array(self.pose)
    }
}

// ---------------------------------------------------------------------------
// Flight volume
// ---------------------------------------------------------------------------

/// Axis-aligned box of permitted positions. `lower.z` is the ground plane.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlightVolume {
    pub lower: Vector3<f64>,
    pub upper: Vector3<f64>,
}

impl Default for FlightVolume {
    fn default() -> Self {
        // 300 m cube centred over the origin, floor at z = 0
        let half = 150.0;
        Self {
            lower: Vector3::new(-half, -half, 0.0),
            upper: Vector3::new(half, half, 2.0 * half),
        }
    }
}

impl FlightVolume {
    pub fn validate(&self) -> SimResult<()> {
        for axis in Axis::ALL {
            let i = axis.index();
            if !(self.lower[i].is_finite() && self.upper[i].is_finite() && self.lower[i] < self.upper[i]) {
                return Err(SimError::invalid(format!(
                    "flight volume {axis:?} bounds [{}, {}] are invalid",
                    self.lower[i], self.upper[i]
                )));
            }
        }
        Ok(())
    }

    pub fn ground(&self) -> f64 {
        self.lower.z
    }

    /// First axis on which `pos` lies strictly outside the box, if any.
    pub fn violation(&self, pos: &Vector3<f64>) -> Option<Axis> {
        Axis::ALL.into_iter().find(|axis| {
            let i = axis.index();
            pos[i] < self.lower[i] || pos[i] > self.upper[i]
        })
    }
}

// ---------------------------------------------------------------------------
// Task config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskConfig {
    pub action_repeat: usize,
    pub target: Vector3<f64>, // m, world frame
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            action_repeat: 3,
            target: Vector3::new(0.0, 0.0, 10.0),
        }
    }
}
