//! Sweep mission simulation.

pub mod mission;
pub mod paths;

pub use mission::SweepMission;
pub use paths::{FlightPath, SweepPath};
