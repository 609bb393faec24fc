//! CLI tool to plan a coverage grid and optionally dispatch a drone.

use clap::Parser;
use skysweep_core::{AreaSelection, Rectangle};
use skysweep_sdk::SkysweepClient;

/// Plan a sweep over a rectangle and optionally dispatch a drone to it
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// SkySweep server URL
    #[arg(long, default_value = "http://localhost:5000")]
    url: String,

    #[arg(long, allow_hyphen_values = true)]
    north: f64,

    #[arg(long, allow_hyphen_values = true)]
    south: f64,

    #[arg(long, allow_hyphen_values = true)]
    east: f64,

    #[arg(long, allow_hyphen_values = true)]
    west: f64,

    /// Send the area to the dispatch service after planning
    #[arg(long)]
    dispatch: bool,

    /// Print every grid line
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut selection = AreaSelection::new();
    let grid = selection.select(Rectangle::new(args.north, args.south, args.east, args.west));

    println!("Coverage grid: {} scan lines", grid.len());
    if args.verbose {
        for (i, lng) in grid.longitudes().enumerate() {
            println!("  [{:2}] lng {:.6}", i, lng);
        }
    }

    match selection.dispatch_request() {
        Ok(request) => println!(
            "Dispatch corners: top-left ({}, {}), bottom-right ({}, {})",
            request.top_left.latitude,
            request.top_left.longitude,
            request.bottom_right.latitude,
            request.bottom_right.longitude
        ),
        Err(e) => eprintln!("Area cannot be dispatched: {}", e),
    }

    if !args.dispatch {
        return Ok(());
    }

    let client = SkysweepClient::new(&args.url);
    println!("Dispatching via {}...", client.base_url());
    let reply = client.dispatch_area(selection.area()).await?;
    println!("{}", reply.message);

    if !reply.is_dispatched() {
        anyhow::bail!("Dispatch not accepted (HTTP {})", reply.status);
    }
    Ok(())
}
