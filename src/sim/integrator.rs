use crate::dynamics;
use crate::dynamics::state::{Deriv, State, NUM_ROTORS};
use crate::vehicle::Airframe;

// ---------------------------------------------------------------------------
// Semi-implicit Euler integrator with constant rotor command over the step
// ---------------------------------------------------------------------------

/// Single step: accelerations from the current state, rates updated first,
/// pose advanced with the new rates. Returns the new state and the
/// accelerations that produced it.
pub fn semi_implicit_euler_step(
    state: &State,
    airframe: &Airframe,
    gravity: f64,
    speeds: &[f64; NUM_ROTORS],
    dt: f64,
) -> (State, Deriv) {
    let d = dynamics::derivatives(state, airframe, gravity, speeds);
    (state.apply(&d, dt), d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::{Pose, G0};
    use approx::assert_relative_eq;

    #[test]
    fn free_fall_matches_closed_form() {
        let a = Airframe::default();
        let dt = 0.02;
        let mut s = State::at_rest(Pose::from_array([0.0, 0.0, 100.0, 0.0, 0.0, 0.0]));
        for _ in 0..10 {
            s = semi_implicit_euler_step(&s, &a, G0, &[0.0; 4], dt).0;
        }
        // v_n = -g n dt, z_n = z0 - g dt^2 n (n + 1) / 2
        assert_relative_eq!(s.vel.z, -G0 * 10.0 * dt, max_relative = 1e-12);
        assert_relative_eq!(s.pose.position.z, 100.0 - G0 * dt * dt * 55.0, max_relative = 1e-12);
    }
}
