use nalgebra::{Rotation3, Vector3};

use crate::dynamics::rotor::{rotor_forces, RotorForces};
use crate::dynamics::state::{Deriv, State, NUM_ROTORS};
use crate::vehicle::Airframe;

// ---------------------------------------------------------------------------
// 6DOF equations of motion
// ---------------------------------------------------------------------------

/// Body → world rotation for 3-2-1 Euler angles (yaw, then pitch, then roll).
pub fn body_to_world(attitude: &Vector3<f64>) -> Rotation3<f64> {
    Rotation3::from_euler_angles(attitude.x, attitude.y, attitude.z)
}

/// Compute linear and angular accelerations for clamped rotor speeds.
///
/// Forces & moments:
///   1. Gravity (world −Z)
///   2. Rotor thrust along body +Z, rotated into the world frame
///   3. Rotor torques from the "+" mixer
///   4. Linear rotational damping
pub fn derivatives(
    state: &State,
    airframe: &Airframe,
    gravity: f64,
    speeds: &[f64; NUM_ROTORS],
) -> Deriv {
    let RotorForces { thrust, torque } = rotor_forces(airframe, speeds);

    // --- Translational ---
    let f_thrust_world = body_to_world(&state.pose.attitude) * Vector3::new(0.0, 0.0, thrust);
    let dvel = f_thrust_world / airframe.mass + Vector3::new(0.0, 0.0, -gravity);

    // --- Rotational: I * domega = torque - omega × (I * omega) ---
    let omega = state.omega;
    let torque_body = torque - omega * airframe.angular_drag;
    let i_vec = airframe.inertia;
    let i_omega = i_vec.component_mul(&omega);
    let domega = (torque_body - omega.cross(&i_omega)).component_div(&i_vec);

    Deriv { dvel, domega }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
