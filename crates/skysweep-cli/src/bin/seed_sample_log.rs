//! CLI tool to store a flight log on the SkySweep server.
//!
//! Sends the reference mission by default, or a simulated sweep over an area.

use chrono::Utc;
use clap::Parser;
use skysweep_cli::SweepMission;
use skysweep_core::{sample_flight_log, Rectangle};
use skysweep_sdk::SkysweepClient;

/// Store a flight log on the SkySweep server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// SkySweep server URL
    #[arg(long, default_value = "http://localhost:5000")]
    url: String,

    /// Fly a simulated sweep instead of sending the reference mission
    #[arg(long)]
    simulate: bool,

    /// Drone identifier for the simulated sweep
    #[arg(long, default_value = "SIM-001")]
    drone: String,

    #[arg(long, default_value_t = 17.3980)]
    north: f64,

    #[arg(long, default_value_t = 17.3960)]
    south: f64,

    #[arg(long, default_value_t = 78.4915)]
    east: f64,

    #[arg(long, default_value_t = 78.4890)]
    west: f64,

    /// Altitude in meters
    #[arg(long, default_value_t = 40.0)]
    altitude: f64,

    /// Ground speed in m/s
    #[arg(long, default_value_t = 8.0)]
    speed: f64,

    /// Seconds between telemetry samples
    #[arg(long, default_value_t = 5.0)]
    interval: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log = if args.simulate {
        let mission = SweepMission {
            drone_id: args.drone.clone(),
            area: Rectangle::new(args.north, args.south, args.east, args.west),
            altitude_m: args.altitude,
            speed_mps: args.speed,
            sample_interval: args.interval,
            start_time: Utc::now(),
        };
        mission.fly()?
    } else {
        sample_flight_log()
    };

    let client = SkysweepClient::new(&args.url);
    println!("Connecting to SkySweep Server at {}...", client.base_url());

    let id = client.save_flight_log(&log).await?;
    println!("Stored flight log {} for {}", id, log.drone_id);
    println!(
        "  Events: {}, Telemetry samples: {}",
        log.events.len(),
        log.telemetry.len()
    );
    println!(
        "  Distance: {:.1}m, Max altitude: {:.1}m",
        log.flight_summary.distance_traveled, log.flight_summary.max_altitude
    );
    Ok(())
}
