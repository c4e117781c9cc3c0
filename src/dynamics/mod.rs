pub mod state;
pub mod rotor;
pub mod rigid_body;

pub use rigid_body::{body_to_world, derivatives};
pub use rotor::{rotor_forces, RotorForces};
pub use state::{wrap_angle, Deriv, Pose, State, G0, NUM_ROTORS, POSE_SIZE};
