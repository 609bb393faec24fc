//! Shared library surface for the SkySweep server and its tests.

pub mod api;
pub mod config;
pub mod history;
pub mod persistence;
pub mod state;
