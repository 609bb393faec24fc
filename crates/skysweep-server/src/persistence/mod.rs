//! Persistence layer for the SkySweep server.
//!
//! Provides SQLite-backed, append-only storage for flight logs.

pub mod db;
pub mod error;
pub mod flight_logs;

pub use db::{init_database, Database};
pub use error::{StoreError, StoreResult};
pub use flight_logs::TelemetryStore;
