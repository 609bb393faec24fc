//! SkySweep CLI - command line tools for the SkySweep server.
//!
//! This crate provides the operator binaries:
//! - seed_sample_log: Store the reference mission or a simulated sweep
//! - list_history: Print stored flight logs
//! - plan_sweep: Plan a coverage grid and optionally dispatch a drone

pub mod sim;

pub use sim::{FlightPath, SweepMission, SweepPath};
