use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use quadcopter_sim::agent::{Agent, AltitudeHoldAgent, ConstantAgent, RandomAgent};
use quadcopter_sim::io::csv;
use quadcopter_sim::sim::{run_episode, EpisodeSummary, FlightRecord, SimConfig};
use quadcopter_sim::task::{EnvironmentTask, LinearDistanceReward, TanhDistanceReward};
use quadcopter_sim::SimResult;

/// Fly a simulated quadrotor through one or more episodes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario TOML file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of episodes to run.
    #[arg(short, long, default_value_t = 1)]
    episodes: usize,

    /// Policy flying the quadrotor.
    #[arg(short, long, value_enum, default_value_t = AgentKind::Random)]
    agent: AgentKind,

    /// Reward shape.
    #[arg(short, long, value_enum, default_value_t = RewardKind::Tanh)]
    reward: RewardKind,

    /// Seed for the random agent.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write the last episode's per-step flight log to this CSV file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write one row per episode (reward, steps, termination) to this CSV file.
    #[arg(long)]
    reward_log: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AgentKind {
    Random,
    Hover,
    Altitude,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RewardKind {
    Tanh,
    Linear,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> SimResult<()> {
    let config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let mut agent: Box<dyn Agent> = match cli.agent {
        AgentKind::Random => Box::new(RandomAgent::with_seed(cli.seed)?),
        AgentKind::Hover => Box::new(ConstantAgent::uniform(
            config.airframe.hover_rotor_speed(config.gravity),
        )),
        AgentKind::Altitude => Box::new(AltitudeHoldAgent::new(&config)),
    };

    let mut task = match cli.reward {
        RewardKind::Tanh => EnvironmentTask::with_reward(config.clone(), TanhDistanceReward::default())?,
        RewardKind::Linear => EnvironmentTask::with_reward(config.clone(), LinearDistanceReward::default())?,
    };

    print_header(&config, agent.name(), task.reward_name());

    let mut summaries = Vec::with_capacity(cli.episodes);
    let mut last_records: Vec<FlightRecord> = Vec::new();
    let mut best = f64::NEG_INFINITY;
    let mut worst = f64::INFINITY;

    for i in 1..=cli.episodes {
        let (summary, records) = run_episode(&mut task, agent.as_mut())?;
        best = best.max(summary.total_reward);
        worst = worst.min(summary.total_reward);
        print_episode(i, &summary, best, worst);
        summaries.push(summary);
        last_records = records;
    }

    if let Some(path) = &cli.output {
        csv::write_flight_log_file(path, &last_records)?;
        println!("  Flight log:  {}", path.display());
    }
    if let Some(path) = &cli.reward_log {
        let mut file = std::fs::File::create(path)?;
        csv::write_reward_log(&mut file, &summaries)?;
        println!("  Reward log:  {}", path.display());
    }
    println!("====================================================================");
    println!();
    Ok(())
}

fn print_header(config: &SimConfig, agent: &str, reward: &str) {
    let a = &config.airframe;
    println!();
    println!("====================================================================");
    println!("  QUADROTOR SIMULATION — agent: {agent}, reward: {reward}");
    println!("====================================================================");
    println!();
    println!("  Airframe");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass:          {:>8.3} kg    Hover speed:  {:>8.1} rev/s",
        a.mass,
        a.hover_rotor_speed(config.gravity)
    );
    println!(
        "  Inertia:       [{:.4}, {:.4}, {:.4}] kg·m^2",
        a.inertia.x, a.inertia.y, a.inertia.z
    );
    println!(
        "  Rotor band:    [{:.0}, {:.0}] rev/s   Max TWR: {:.2}",
        a.rotor_min,
        a.rotor_max,
        a.max_twr(config.gravity)
    );
    println!(
        "  dt:            {:>8.4} s     Runtime:      {:>8.1} s   Repeat: {}",
        config.dt, config.runtime, config.task.action_repeat
    );
    println!();
    println!("  Episodes");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>5}  {:>9}  {:>9}  {:>9}  {:>6}  {:>7}  {}",
        "ep", "reward", "best", "worst", "steps", "t (s)", "end"
    );
    println!("  {}", "─".repeat(64));
}

fn print_episode(i: usize, s: &EpisodeSummary, best: f64, worst: f64) {
    let end = s
        .termination
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".into());
    println!(
        "  {:>5}  {:>9.3}  {:>9.3}  {:>9.3}  {:>6}  {:>7.2}  {}",
        i, s.total_reward, best, worst, s.steps, s.flight_time, end
    );
}
