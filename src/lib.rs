pub mod error;
pub mod dynamics;
pub mod vehicle;
pub mod sim;
pub mod task;
pub mod agent;
pub mod io;

pub use error::{SimError, SimResult};
pub use sim::{run_episode, RigidBodySimulator, SimConfig, Termination};
pub use task::{Environment, EnvironmentTask, RewardFn, Transition};
