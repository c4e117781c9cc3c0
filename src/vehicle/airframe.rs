use nalgebra::Vector3;
use serde::Deserialize;

use crate::dynamics::state::NUM_ROTORS;
use crate::error::{SimError, SimResult};

// ---------------------------------------------------------------------------
// Airframe: mass properties and rotor coefficients of one quadrotor
// ---------------------------------------------------------------------------

// 0.51 x 0.51 x 0.235 m box, 0.958 kg
const DEFAULT_MASS: f64 = 0.958;
const DEFAULT_DIMS: [f64; 3] = [0.51, 0.51, 0.235];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Airframe {
    pub mass: f64,              // kg
    pub inertia: Vector3<f64>,  // [Ixx, Iyy, Izz] principal moments, kg·m^2
    pub arm_length: f64,        // hub to rotor, m
    pub thrust_coeff: f64,      // N per (rev/s)^2
    pub torque_coeff: f64,      // N·m per (rev/s)^2, reaction yaw torque
    pub angular_drag: f64,      // N·m per rad/s, linear rotational damping
    pub rotor_min: f64,         // rev/s
    pub rotor_max: f64,         // rev/s
}

impl Default for Airframe {
    fn default() -> Self {
        let [w, l, h] = DEFAULT_DIMS;
        let m = DEFAULT_MASS;
        Self {
            mass: m,
            inertia: Vector3::new(
                m / 12.0 * (h * h + w * w),
                m / 12.0 * (h * h + l * l),
                m / 12.0 * (w * w + l * l),
            ),
            arm_length: 0.4,
            // C_T * rho * D^4 with C_T = 0.12, rho = 1.2, D = 0.1 m
            thrust_coeff: 1.44e-5,
            torque_coeff: 2.3e-7,
            angular_drag: 0.01,
            rotor_min: 0.0,
            rotor_max: 900.0,
        }
    }
}

impl Airframe {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimError::invalid(format!(
                "mass must be positive, got {}",
                self.mass
            )));
        }
        if self.inertia.iter().any(|i| !(i.is_finite() && *i > 0.0)) {
            return Err(SimError::invalid(format!(
                "moments of inertia must be positive, got [{}, {}, {}]",
                self.inertia.x, self.inertia.y, self.inertia.z
            )));
        }
        let coeffs = [
            ("arm_length", self.arm_length),
            ("thrust_coeff", self.thrust_coeff),
            ("torque_coeff", self.torque_coeff),
            ("angular_drag", self.angular_drag),
        ];
        for (name, v) in coeffs {
            if !(v.is_finite() && v >= 0.0) {
                return Err(SimError::invalid(format!(
                    "{name} must be non-negative, got {v}"
                )));
            }
        }
        if !(self.rotor_min >= 0.0 && self.rotor_min <= self.rotor_max && self.rotor_max.is_finite())
        {
            return Err(SimError::invalid(format!(
                "rotor band [{}, {}] is invalid",
                self.rotor_min, self.rotor_max
            )));
        }
        Ok(())
    }

    /// Per-rotor speed at which total thrust balances weight, clamped to the band.
    pub fn hover_rotor_speed(&self, gravity: f64) -> f64 {
        if self.thrust_coeff <= 0.0 {
            return self.rotor_max;
        }
        let per_rotor = self.mass * gravity / NUM_ROTORS as f64;
        (per_rotor / self.thrust_coeff)
            .sqrt()
            .clamp(self.rotor_min, self.rotor_max)
    }

    /// Thrust-to-weight ratio with every rotor at `rotor_max`.
    pub fn max_twr(&self, gravity: f64) -> f64 {
        NUM_ROTORS as f64 * self.thrust_coeff * self.rotor_max.powi(2) / (self.mass * gravity)
    }
}

// ---------------------------------------------------------------------------
// Airframe builder
// ---------------------------------------------------------------------------

pub struct AirframeBuilder {
    airframe: Airframe,
}

impl AirframeBuilder {
    pub fn new() -> Self {
        Self { airframe: Airframe::default() }
    }

    pub fn mass(mut self, v: f64) -> Self { self.airframe.mass = v; self }
    pub fn inertia(mut self, v: Vector3<f64>) -> Self { self.airframe.inertia = v; self }
    pub fn arm_length(mut self, v: f64) -> Self { self.airframe.arm_length = v; self }
    pub fn thrust_coeff(mut self, v: f64) -> Self { self.airframe.thrust_coeff = v; self }
    pub fn torque_coeff(mut self, v: f64) -> Self { self.airframe.torque_coeff = v; self }
    pub fn angular_drag(mut self, v: f64) -> Self { self.airframe.angular_drag = v; self }
    pub fn rotor_band(mut self, min: f64, max: f64) -> Self {
        self.airframe.rotor_min = min;
        self.airframe.rotor_max = max;
        self
    }

    pub fn build(self) -> SimResult<Airframe> {
        self.airframe.validate()?;
        Ok(self.airframe)
    }
}

impl Default for AirframeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
