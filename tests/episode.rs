use std::f64::consts::TAU;

use approx::assert_relative_eq;
use nalgebra::Vector3;

use quadcopter_sim::agent::{AltitudeHoldAgent, ConstantAgent};
use quadcopter_sim::io::csv;
use quadcopter_sim::sim::{run_episode, SimConfig, Termination};
use quadcopter_sim::task::{Environment, EnvironmentTask};

// ---------------------------------------------------------------------------
// Free fall from 10 m with the rotors off
// ---------------------------------------------------------------------------

#[test]
fn dropped_from_ten_metres_stops_on_the_ground() {
    let config = SimConfig::default()
        .with_initial_pose([0.0, 0.0, 10.0, 0.0, 0.0, 0.0])
        .with_runtime(5.0)
        .with_dt(1.0 / 50.0)
        .with_action_repeat(3);
    let mut task = EnvironmentTask::new(config).unwrap();

    let initial = task.reset();
    assert_eq!(initial.len(), 18);

    let mut calls = 0;
    let last = loop {
        let tr = task.step(&[0.0, 0.0, 0.0, 0.0]).unwrap();
        calls += 1;
        assert_eq!(tr.state.len(), 18);
        if tr.done {
            break tr;
        }
        assert!(calls < 100, "Episode never ended");
    };

    // z crosses the floor on physics step 71, inside the 24th call
    assert_eq!(calls, 24);
    let sim = task.sim();
    assert_eq!(sim.termination(), Some(Termination::GroundContact));
    assert_eq!(sim.pose().position.z, 0.0);
    assert_eq!(*sim.velocity(), Vector3::zeros());
    assert_eq!(*sim.angular_velocity(), Vector3::zeros());

    // The remaining substep of the call still ran
    assert_eq!(sim.steps(), 72);
    assert_relative_eq!(sim.time(), 72.0 / 50.0, max_relative = 1e-12);

    // Last two snapshots are both on the ground
    let z: Vec<f64> = last.state.chunks(6).map(|p| p[2]).collect();
    assert!(z[0] > 0.0);
    assert_eq!(z[1], 0.0);
    assert_eq!(z[2], 0.0);
}

#[test]
fn free_fall_velocity_follows_gravity_until_contact() {
    let config = SimConfig::default().with_action_repeat(1);
    let g = config.gravity;
    let mut task = EnvironmentTask::new(config).unwrap();
    task.reset();
    loop {
        let tr = task.step(&[0.0; 4]).unwrap();
        let sim = task.sim();
        if tr.done {
            assert_eq!(sim.velocity().z, 0.0);
            break;
        }
        assert_relative_eq!(sim.velocity().z, -g * sim.time(), max_relative = 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Environment contract
// ---------------------------------------------------------------------------

#[test]
fn state_shape_follows_action_repeat() {
    for repeat in [1, 2, 5] {
        let config = SimConfig::default()
            .with_initial_pose([149.9, 0.0, 50.0, 0.0, 0.0, 0.0])
            .with_initial_velocity(Vector3::new(10.0, 0.0, 0.0))
            .with_action_repeat(repeat);
        let mut task = EnvironmentTask::new(config).unwrap();
        assert_eq!(task.reset().len(), 6 * repeat);
        // Bounds violation on the first substep still yields a full state
        let tr = task.step(&[450.0; 4]).unwrap();
        assert!(tr.done);
        assert_eq!(task.sim().steps(), repeat as u64);
        assert_eq!(tr.state.len(), 6 * repeat);
    }
}

#[test]
fn tumbling_keeps_angles_wrapped() {
    let config = SimConfig::default()
        .with_initial_pose([0.0, 0.0, 200.0, 0.0, 0.0, 0.0])
        .with_initial_angular_velocity(Vector3::new(-4.0, 6.0, -9.0));
    let mut task = EnvironmentTask::new(config).unwrap();
    task.reset();
    for _ in 0..30 {
        let tr = task.step(&[700.0, 100.0, 300.0, 800.0]).unwrap();
        for pose in tr.state.chunks(6) {
            assert!(pose[3..].iter().all(|a| (0.0..TAU).contains(a)), "Angles {pose:?}");
        }
    }
}

#[test]
fn reset_twice_equals_reset_once() {
    let mut task = EnvironmentTask::new(SimConfig::default()).unwrap();
    task.reset();
    for _ in 0..10 {
        task.step(&[480.0, 470.0, 460.0, 450.0]).unwrap();
    }
    let once = task.reset();
    let sim_once = task.sim().state().clone();
    let twice = task.reset();
    assert_eq!(once, twice);
    assert_eq!(task.sim().state(), &sim_once);
}

// ---------------------------------------------------------------------------
// Runner + flight log
// ---------------------------------------------------------------------------

#[test]
fn altitude_hold_episode_writes_flight_log() {
    let config = SimConfig::from_toml_str(include_str!("../scenarios/hover.toml")).unwrap();
    let mut agent = AltitudeHoldAgent::new(&config);
    let mut task = EnvironmentTask::new(config).unwrap();

    let (summary, records) = run_episode(&mut task, &mut agent).unwrap();
    assert_eq!(summary.termination, Some(Termination::TimeLimit));
    assert!((summary.final_pose.position.z - 10.0).abs() < 0.5);

    let mut buf = Vec::new();
    csv::write_flight_log(&mut buf, &records).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().count(), records.len() + 1);
}

#[test]
fn takeoff_scenario_parses_and_climbs() {
    let config = SimConfig::from_toml_str(include_str!("../scenarios/takeoff.toml")).unwrap();
    assert_eq!(config.task.target.z, 100.0);
    let mut task = EnvironmentTask::new(config).unwrap();
    let (summary, _) = run_episode(&mut task, &mut ConstantAgent::uniform(500.0)).unwrap();
    assert!(summary.max_altitude > 10.0);
}
