use nalgebra::Vector3;

use crate::dynamics::state::NUM_ROTORS;
use crate::error::{SimError, SimResult};
use crate::vehicle::Airframe;

// ---------------------------------------------------------------------------
// Rotor commands
// ---------------------------------------------------------------------------

/// Check a raw command slice and clamp it into the airframe's rotor band.
///
/// Wrong length and non-finite entries are rejected. Values outside the band,
/// negatives included, are clamped.
pub fn sanitize(speeds: &[f64], airframe: &Airframe) -> SimResult<[f64; NUM_ROTORS]> {
    if speeds.len() != NUM_ROTORS {
        return Err(SimError::invalid(format!(
            "expected {} rotor speeds, got {}",
            NUM_ROTORS,
            speeds.len()
        )));
    }
    let mut out = [0.0; NUM_ROTORS];
    for (i, (&n, slot)) in speeds.iter().zip(out.iter_mut()).enumerate() {
        if !n.is_finite() {
            return Err(SimError::invalid(format!("rotor {} speed is {}", i + 1, n)));
        }
        *slot = n.clamp(airframe.rotor_min, airframe.rotor_max);
    }
    if out.iter().zip(speeds).any(|(c, n)| c != n) {
        tracing::debug!(?speeds, clamped = ?out, "rotor command clamped to band");
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Thrust and torque mixing ("+" layout)
// ---------------------------------------------------------------------------

/// Net rotor output in the body frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotorForces {
    pub thrust: f64,          // N, along body +Z
    pub torque: Vector3<f64>, // N·m, body frame
}

/// Rotor 1 sits on +X, rotor 2 on +Y, rotor 3 on −X, rotor 4 on −Y.
/// Rotors 1 and 3 spin opposite to rotors 2 and 4.
/// Yaw torque pairs the same-spin rotors: `k_m·((n1² + n3²) − (n2² + n4²))`.
pub fn rotor_forces(airframe: &Airframe, speeds: &[f64; NUM_ROTORS]) -> RotorForces {
    let sq = speeds.map(|n| n * n);
    let t = sq.map(|s| airframe.thrust_coeff * s);
    let l = airframe.arm_length;

    RotorForces {
        thrust: t.iter().sum(),
        torque: Vector3::new(
            l * (t[1] - t[3]),
            l * (t[2] - t[0]),
            airframe.torque_coeff * ((sq[0] + sq[2]) - (sq[1] + sq[3])),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wrong_length_rejected() {
        let a = Airframe::default();
        let err = sanitize(&[1.0, 2.0, 3.0], &a).unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument(_)));
        assert!(sanitize(&[0.0; 5], &a).is_err());
    }

    #[test]
    fn non_finite_rejected() {
        let a = Airframe::default();
        assert!(sanitize(&[0.0, f64::NAN, 0.0, 0.0], &a).is_err());
        assert!(sanitize(&[0.0, 0.0, f64::INFINITY, 0.0], &a).is_err());
    }

    #[test]
    fn out_of_band_clamped() {
        let a = Airframe::default();
        let out = sanitize(&[-5.0, 450.0, 1200.0, 900.0], &a).unwrap();
        assert_eq!(out, [0.0, 450.0, 900.0, 900.0]);
    }

    #[test]
    fn equal_speeds_give_pure_thrust() {
        let a = Airframe::default();
        let f = rotor_forces(&a, &[400.0; 4]);
        assert_relative_eq!(f.thrust, 4.0 * a.thrust_coeff * 160_000.0, max_relative = 1e-12);
        assert_eq!(f.torque, Vector3::zeros());
    }

    #[test]
    fn differential_speeds_create_torque() {
        let a = Airframe::default();
        let roll = rotor_forces(&a, &[400.0, 500.0, 400.0, 400.0]);
        assert!(roll.torque.x > 0.0);
        assert_eq!(roll.torque.y, 0.0);

        let pitch = rotor_forces(&a, &[400.0, 400.0, 500.0, 400.0]);
        assert!(pitch.torque.y > 0.0);
        assert_eq!(pitch.torque.x, 0.0);

        let yaw = rotor_forces(&a, &[500.0, 400.0, 500.0, 400.0]);
        assert!(yaw.torque.z > 0.0);
        assert_eq!(yaw.torque.x, 0.0);
        assert_eq!(yaw.torque.y, 0.0);
    }
}
