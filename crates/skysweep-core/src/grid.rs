//! Coverage grid planning over an operator-selected rectangle.
//!
//! The grid is a set of vertical (constant-longitude) scan lines spanning the
//! full latitude range of the rectangle. Latitude is not subdivided into
//! horizontal lines.

use crate::models::{CoverageGrid, GridLine, LatLng, Rectangle};

/// Number of equal longitude intervals in the reference sweep.
pub const DEFAULT_LNG_INTERVALS: usize = 50;

/// Plan the reference sweep: 51 scan lines across `[west, east]`.
pub fn plan_grid(area: &Rectangle) -> CoverageGrid {
    plan_grid_with(area, DEFAULT_LNG_INTERVALS)
}

/// Plan a sweep with `intervals` equal longitude steps (`intervals + 1`
/// lines). An interval count of zero is treated as one.
///
/// Never fails: degenerate or inverted rectangles yield coincident or
/// reversed lines rather than an error.
pub fn plan_grid_with(area: &Rectangle, intervals: usize) -> CoverageGrid {
    let intervals = intervals.max(1);
    let width = area.east - area.west;

    let lines = (0..=intervals)
        .map(|i| {
            // Pin the closing line so it lands on `east` without rounding drift.
            let lng = if i == intervals {
                area.east
            } else {
                area.west + i as f64 * width / intervals as f64
            };
            GridLine {
                start: LatLng {
                    lat: area.south,
                    lng,
                },
                end: LatLng {
                    lat: area.north,
                    lng,
                },
            }
        })
        .collect();

    CoverageGrid { lines }
}
