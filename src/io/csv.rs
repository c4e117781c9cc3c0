use std::io::{self, Write};
use std::path::Path;

use crate::sim::runner::{EpisodeSummary, FlightRecord};

const FLIGHT_LOG_HEADER: &str = "time,x,y,z,phi,theta,psi,\
     x_velocity,y_velocity,z_velocity,\
     phi_velocity,theta_velocity,psi_velocity,\
     rotor_speed1,rotor_speed2,rotor_speed3,rotor_speed4";

/// Write per-step flight data to CSV format.
///
/// Columns: time, pose (6), linear velocity (3), angular velocity (3),
///          rotor speeds (4)
pub fn write_flight_log<W: Write>(writer: &mut W, records: &[FlightRecord]) -> io::Result<()> {
    writeln!(writer, "{FLIGHT_LOG_HEADER}")?;

    for r in records {
        let p = r.pose.to_array();
        let n = r.rotor_speeds;
        writeln!(
            writer,
            "{:.4},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},\
             {:.6},{:.6},{:.6},{:.6},{:.6},{:.6},\
             {:.3},{:.3},{:.3},{:.3}",
            r.time,
            p[0], p[1], p[2], p[3], p[4], p[5],
            r.velocity.x, r.velocity.y, r.velocity.z,
            r.angular_velocity.x, r.angular_velocity.y, r.angular_velocity.z,
            n[0], n[1], n[2], n[3],
        )?;
    }

    Ok(())
}

/// Write a flight log to a CSV file at the given path.
pub fn write_flight_log_file(path: impl AsRef<Path>, records: &[FlightRecord]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_flight_log(&mut file, records)
}

/// Write one row per episode: index, total reward, steps, flight time, termination.
pub fn write_reward_log<W: Write>(writer: &mut W, episodes: &[EpisodeSummary]) -> io::Result<()> {
    writeln!(writer, "episode,reward,steps,flight_time,termination")?;
    for (i, e) in episodes.iter().enumerate() {
        let reason = e
            .termination
            .map(|t| t.to_string())
            .unwrap_or_else(|| "none".into());
        writeln!(
            writer,
            "{},{:.4},{},{:.3},{}",
            i + 1,
            e.total_reward,
            e.steps,
            e.flight_time,
            reason
        )?;
    }
    Ok(())
}
