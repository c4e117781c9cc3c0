pub mod env;
pub mod reward;

pub use env::{Environment, EnvironmentTask, Transition};
pub use reward::{position_error, LinearDistanceReward, RewardFn, TanhDistanceReward};
