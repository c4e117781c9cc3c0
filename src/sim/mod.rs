pub mod config;
pub mod event;
pub mod integrator;
pub mod runner;
pub mod simulator;

pub use config::{FlightVolume, InitialConditions, SimConfig, TaskConfig};
pub use event::{Axis, Termination};
pub use integrator::semi_implicit_euler_step;
pub use runner::{run_episode, EpisodeSummary, FlightRecord};
pub use simulator::RigidBodySimulator;
