//! SkySweep core: flight log data model, coverage grid planning and
//! dispatch request normalization.
//!
//! Everything here is pure and synchronous; persistence and transport live in
//! the server and dispatch crates.

pub mod dispatch;
pub mod fixtures;
pub mod grid;
pub mod models;
pub mod spatial;
pub mod validation;

pub use dispatch::{build_dispatch_request, format_coordinate, AreaSelection, InvalidAreaError};
pub use fixtures::sample_flight_log;
pub use grid::{plan_grid, plan_grid_with, DEFAULT_LNG_INTERVALS};
pub use models::{
    CoverageGrid, DispatchPoint, DispatchRequest, EventType, FinalizedLogError, FlightEvent,
    FlightLog, FlightSummary, GeoLocation, GridLine, LatLng, Rectangle, StoredFlightLog, StoredId,
    TelemetrySample,
};
pub use spatial::haversine_distance;
pub use validation::ValidationError;
