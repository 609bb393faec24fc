//! CLI tool to print the flight history stored on the SkySweep server.

use clap::Parser;
use skysweep_sdk::SkysweepClient;

/// Print stored flight logs, oldest first
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// SkySweep server URL
    #[arg(long, default_value = "http://localhost:5000")]
    url: String,

    /// Print the raw JSON history instead of a summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = SkysweepClient::new(&args.url);

    let history = client.list_history().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No flight logs stored.");
        return Ok(());
    }

    for entry in &history {
        let summary = &entry.log.flight_summary;
        let window = match (summary.start_time, summary.end_time) {
            (Some(start), Some(end)) => format!("{} -> {}", start, end),
            (Some(start), None) => format!("{} -> (open)", start),
            _ => "(no times)".to_string(),
        };
        println!("{} [{}] {}", entry.id, entry.log.drone_id, window);
        println!(
            "    {:.1}m travelled, max alt {:.1}m, avg {:.1}m/s, {} events, {} samples",
            summary.distance_traveled,
            summary.max_altitude,
            summary.average_speed,
            entry.log.events.len(),
            entry.log.telemetry.len()
        );
        for event in &entry.log.events {
            println!(
                "    {} {} ({:.6}, {:.6})",
                event.timestamp, event.event_type, event.location.latitude, event.location.longitude
            );
        }
    }

    println!("\n{} flight log(s).", history.len());
    Ok(())
}
