use nalgebra::Vector3;
use tracing::info;

use crate::agent::Agent;
use crate::dynamics::state::{Pose, NUM_ROTORS};
use crate::error::SimResult;
use crate::sim::event::Termination;
use crate::task::{Environment, EnvironmentTask};

// ---------------------------------------------------------------------------
// Per-step flight record
// ---------------------------------------------------------------------------

/// Snapshot taken after each agent decision, for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    pub time: f64,
    pub pose: Pose,
    pub velocity: Vector3<f64>,
    pub angular_velocity: Vector3<f64>,
    pub rotor_speeds: [f64; NUM_ROTORS],
    pub reward: f64,
}

/// Summary statistics for one episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub steps: usize,
    pub total_reward: f64,
    pub flight_time: f64,
    pub max_altitude: f64,
    pub final_pose: Pose,
    pub termination: Option<Termination>,
}

// ---------------------------------------------------------------------------
// Episode loop
// ---------------------------------------------------------------------------

/// Run one episode from reset to `done`, recording every agent step.
pub fn run_episode(
    task: &mut EnvironmentTask,
    agent: &mut dyn Agent,
) -> SimResult<(EpisodeSummary, Vec<FlightRecord>)> {
    let mut state = task.reset();
    agent.reset();

    let sim_cfg = task.sim().config();
    let per_call = sim_cfg.dt * task.action_repeat() as f64;
    let capacity = (sim_cfg.runtime / per_call) as usize + 1;
    let mut records = Vec::with_capacity(capacity.min(100_000));

    let mut total_reward = 0.0;
    let mut max_altitude = task.sim().pose().position.z;

    loop {
        let rotor_speeds = agent.act(&state);
        let tr = task.step(&rotor_speeds)?;
        total_reward += tr.reward;

        let sim = task.sim();
        max_altitude = max_altitude.max(sim.pose().position.z);
        records.push(FlightRecord {
            time: sim.time(),
            pose: *sim.pose(),
            velocity: *sim.velocity(),
            angular_velocity: *sim.angular_velocity(),
            rotor_speeds,
            reward: tr.reward,
        });

        state = tr.state;
        if tr.done {
            break;
        }
    }

    let sim = task.sim();
    let summary = EpisodeSummary {
        steps: records.len(),
        total_reward,
        flight_time: sim.time(),
        max_altitude,
        final_pose: *sim.pose(),
        termination: sim.termination(),
    };
    info!(
        agent = agent.name(),
        steps = summary.steps,
        reward = summary.total_reward,
        t = summary.flight_time,
        "episode finished"
    );
    Ok((summary, records))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
