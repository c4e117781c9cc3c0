use nalgebra::Vector3;

use crate::dynamics::state::{NUM_ROTORS, POSE_SIZE};
use crate::error::SimResult;
use crate::sim::config::SimConfig;
use crate::sim::simulator::RigidBodySimulator;
use crate::task::reward::{RewardFn, TanhDistanceReward};

// ---------------------------------------------------------------------------
// Environment contract
// ---------------------------------------------------------------------------

/// Output of one environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: Vec<f64>,
    pub reward: f64,
    pub done: bool,
}

/// Step-wise interface between an agent and a simulated task.
pub trait Environment {
    /// Length of the state vectors returned by `reset` and `step`.
    fn state_size(&self) -> usize;

    fn action_size(&self) -> usize {
        NUM_ROTORS
    }

    /// Inclusive `(low, high)` range of each action component.
    fn action_bounds(&self) -> (f64, f64);

    /// Start a new episode and return its initial state.
    fn reset(&mut self) -> Vec<f64>;

    fn step(&mut self, action: &[f64]) -> SimResult<Transition>;
}

// ---------------------------------------------------------------------------
// Quadrotor task: action repeat + pose history + reward
// ---------------------------------------------------------------------------

/// Wraps a [`RigidBodySimulator`] with an action repeat and a reward strategy.
///
/// The state handed to the agent is the last `action_repeat` poses,
/// oldest first, flattened into one vector.
pub struct EnvironmentTask {
    sim: RigidBodySimulator,
    action_repeat: usize,
    target: Vector3<f64>,
    reward_fn: Box<dyn RewardFn + Send>,
    initial_state: Vec<f64>,
}

impl EnvironmentTask {
    /// Build with the default [`TanhDistanceReward`].
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::with_reward(config, TanhDistanceReward::default())
    }

    pub fn with_reward(config: SimConfig, reward_fn: impl RewardFn + Send + 'static) -> SimResult<Self> {
        let action_repeat = config.task.action_repeat;
        let target = config.task.target;
        let sim = RigidBodySimulator::new(config)?;
        let initial_state = sim.initial_pose().to_array().repeat(action_repeat);
        Ok(Self {
            sim,
            action_repeat,
            target,
            reward_fn: Box::new(reward_fn),
            initial_state,
        })
    }

    /// Swap the reward strategy; takes effect on the next step.
    pub fn set_reward(&mut self, reward_fn: impl RewardFn + Send + 'static) {
        self.reward_fn = Box::new(reward_fn);
    }

    pub fn reward_name(&self) -> &str {
        self.reward_fn.name()
    }

    pub fn sim(&self) -> &RigidBodySimulator {
        &self.sim
    }

    pub fn action_repeat(&self) -> usize {
        self.action_repeat
    }

    pub fn target(&self) -> &Vector3<f64> {
        &self.target
    }

    /// Reward for the simulator's current pose.
    pub fn current_reward(&self) -> f64 {
        self.reward_fn.compute(self.sim.pose(), &self.target)
    }
}

impl Environment for EnvironmentTask {
    fn state_size(&self) -> usize {
        POSE_SIZE * self.action_repeat
    }

    fn action_bounds(&self) -> (f64, f64) {
        let airframe = &self.sim.config().airframe;
        (airframe.rotor_min, airframe.rotor_max)
    }

    fn reset(&mut self) -> Vec<f64> {
        self.sim.reset();
        self.initial_state.clone()
    }

    /// Run `action_repeat` physics steps under the same rotor command.
    ///
    /// A termination inside the repeat does not cut it short: the remaining
    /// substeps still run and `done` is the OR over all of them. Rewards are
    /// summed over the substeps.
    fn step(&mut self, action: &[f64]) -> SimResult<Transition> {
        let mut reward = 0.0;
        let mut done = false;
        let mut state = Vec::with_capacity(self.state_size());

        for _ in 0..self.action_repeat {
            // Validation happens before any mutation, so an error here can
            // only come from the first substep.
            done |= self.sim.next_timestep(action)?;
            reward += self.current_reward();
            state.extend_from_slice(&self.sim.pose().to_array());
        }

        Ok(Transition { state, reward, done })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::Pose;
    use crate::task::reward::LinearDistanceReward;
    use approx::assert_relative_eq;

    fn task() -> EnvironmentTask {
        EnvironmentTask::new(SimConfig::default()).unwrap()
    }

    #[test]
    fn reset_replicates_initial_pose() {
        let mut t = task();
        let s = t.reset();
        assert_eq!(s.len(), 18);
        assert_eq!(t.state_size(), 18);
        for chunk in s.chunks(POSE_SIZE) {
            assert_eq!(chunk, &[0.0, 0.0, 10.0, 0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn reset_after_steps_matches_first_reset() {
        let mut t = task();
        let first = t.reset();
        for _ in 0..5 {
            t.step(&[500.0, 420.0, 450.0, 470.0]).unwrap();
        }
        assert_eq!(t.reset(), first);
        assert_eq!(t.sim().time(), 0.0);
    }

    #[test]
    fn step_returns_history_oldest_first() {
        let mut t = task();
        t.reset();
        let tr = t.step(&[0.0; 4]).unwrap();
        assert_eq!(tr.state.len(), 18);
        let z: Vec<f64> = tr.state.chunks(POSE_SIZE).map(|p| p[2]).collect();
        assert!(z[0] > z[1] && z[1] > z[2], "Falling z should decrease: {z:?}");
        assert_eq!(z[2], t.sim().pose().position.z);
        assert!(!tr.done);
    }

    #[test]
    fn reward_is_summed_over_repeats() {
        let config = SimConfig::default().with_target(Vector3::new(0.0, 0.0, 10.0));
        let mut t = EnvironmentTask::with_reward(config, |_: &Pose, _: &Vector3<f64>| 0.25).unwrap();
        t.reset();
        let tr = t.step(&[450.0; 4]).unwrap();
        assert_relative_eq!(tr.reward, 0.75);
    }

    #[test]
    fn reward_can_be_swapped() {
        let mut t = task();
        assert_eq!(t.reward_name(), "tanh-distance");
        t.set_reward(LinearDistanceReward::default());
        assert_eq!(t.reward_name(), "linear-distance");
        t.reset();
        // At the target the linear reward saturates at 1
        assert_eq!(t.current_reward(), 1.0);
    }

    #[test]
    fn wrong_action_length_is_an_error() {
        let mut t = task();
        t.reset();
        assert!(t.step(&[450.0; 3]).is_err());
        assert_eq!(t.sim().steps(), 0);
    }

    #[test]
    fn action_space_matches_rotor_band() {
        let t = task();
        assert_eq!(t.action_size(), 4);
        assert_eq!(t.action_bounds(), (0.0, 900.0));
    }
}
