//! SkySweep SDK - operator integration library
//!
//! Provides a simple API for recording flight logs, reading flight history
//! and requesting area sweeps from a SkySweep server.

pub mod client;

pub use client::{DispatchReply, SkysweepClient};
pub use skysweep_core::{FlightLog, Rectangle, StoredFlightLog};
