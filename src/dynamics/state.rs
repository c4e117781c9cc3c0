use std::f64::consts::TAU;

use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.81; // m/s^2
pub const NUM_ROTORS: usize = 4;
pub const POSE_SIZE: usize = 6;

/// Wrap an angle into [0, 2π).
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

// ---------------------------------------------------------------------------
// Pose: position + Euler attitude
// ---------------------------------------------------------------------------

/// Position in the world frame and 3-2-1 Euler attitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3<f64>, // m, world frame [x, y, z]
    pub attitude: Vector3<f64>, // rad, [phi, theta, psi], each in [0, 2π)
}

impl Pose {
    pub fn new(position: Vector3<f64>, attitude: Vector3<f64>) -> Self {
        Self {
            position,
            attitude: attitude.map(wrap_angle),
        }
    }

    /// Build from the flat `[x, y, z, phi, theta, psi]` layout.
    pub fn from_array(values: [f64; POSE_SIZE]) -> Self {
        Self::new(
            Vector3::new(values[0], values[1], values[2]),
            Vector3::new(values[3], values[4], values[5]),
        )
    }

    pub fn to_array(&self) -> [f64; POSE_SIZE] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.attitude.x,
            self.attitude.y,
            self.attitude.z,
        ]
    }

    pub fn phi(&self) -> f64 {
        self.attitude.x
    }

    pub fn theta(&self) -> f64 {
        self.attitude.y
    }

    pub fn psi(&self) -> f64 {
        self.attitude.z
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            attitude: Vector3::zeros(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rigid-body state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub time: f64,
    pub pose: Pose,
    pub vel: Vector3<f64>,   // m/s, world frame
    pub omega: Vector3<f64>, // rad/s, body axes [p, q, r]
}

impl State {
    pub fn at_rest(pose: Pose) -> Self {
        Self {
            time: 0.0,
            pose,
            vel: Vector3::zeros(),
            omega: Vector3::zeros(),
        }
    }

    /// Semi-implicit Euler update: rates first, then pose from the new rates.
    pub fn apply(&self, d: &Deriv, dt: f64) -> State {
        let vel = self.vel + d.dvel * dt;
        let omega = self.omega + d.domega * dt;
        let position = self.pose.position + vel * dt;
        let attitude = self.pose.attitude + omega * dt;
        State {
            time: self.time + dt,
            pose: Pose::new(position, attitude),
            vel,
            omega,
        }
    }
}

// ---------------------------------------------------------------------------
// State derivative (accelerations only; pose rates come from the state)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deriv {
    pub dvel: Vector3<f64>,   // linear acceleration, world frame
    pub domega: Vector3<f64>, // angular acceleration, body frame
}

impl Deriv {
    pub fn zeros() -> Self {
        Self {
            dvel: Vector3::zeros(),
            domega: Vector3::zeros(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_handles_negative_and_large_angles() {
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-12);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-12);
        assert_eq!(wrap_angle(TAU), 0.0);
        let tiny = wrap_angle(-1e-20);
        assert!((0.0..TAU).contains(&tiny));
    }

    #[test]
    fn pose_array_layout() {
        let pose = Pose::from_array([1.0, 2.0, 3.0, 0.1, 0.2, 0.3]);
        assert_eq!(pose.to_array(), [1.0, 2.0, 3.0, 0.1, 0.2, 0.3]);
        assert_eq!(pose.psi(), 0.3);
    }

    #[test]
    fn apply_uses_updated_velocity() {
        let s = State::at_rest(Pose::default());
        let d = Deriv {
            dvel: Vector3::new(0.0, 0.0, -10.0),
            domega: Vector3::zeros(),
        };
        let next = s.apply(&d, 0.1);
        assert!((next.vel.z + 1.0).abs() < 1e-12);
        // position moves with the new velocity, not the old one
        assert!((next.pose.position.z + 0.1).abs() < 1e-12);
    }
}
