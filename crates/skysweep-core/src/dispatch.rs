//! Conversion of a selected rectangle into a drone-dispatch request.

use thiserror::Error;

use crate::grid::plan_grid;
use crate::models::{CoverageGrid, DispatchPoint, DispatchRequest, Rectangle};

/// Fractional digits carried by every dispatch coordinate.
pub const COORDINATE_DECIMALS: usize = 6;

/// Dispatch was requested without a usable area.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidAreaError {
    #[error("no area has been selected")]
    NoAreaSelected,

    #[error("selected area has a non-finite edge: {0:?}")]
    NonFinite(Rectangle),

    /// `north <= south` or `east <= west`.
    #[error(
        "selected area is degenerate (north {n}, south {s}, east {e}, west {w})",
        n = .0.north, s = .0.south, e = .0.east, w = .0.west
    )]
    Degenerate(Rectangle),
}

/// Build the wire request for `area`.
///
/// `top_left` is `(north, west)` and `bottom_right` is `(south, east)`.
pub fn build_dispatch_request(
    area: Option<&Rectangle>,
) -> Result<DispatchRequest, InvalidAreaError> {
    let area = area.ok_or(InvalidAreaError::NoAreaSelected)?;
    if !area.is_finite() {
        return Err(InvalidAreaError::NonFinite(*area));
    }
    if area.is_degenerate() {
        return Err(InvalidAreaError::Degenerate(*area));
    }

    Ok(DispatchRequest {
        top_left: DispatchPoint {
            latitude: format_coordinate(area.north),
            longitude: format_coordinate(area.west),
        },
        bottom_right: DispatchPoint {
            latitude: format_coordinate(area.south),
            longitude: format_coordinate(area.east),
        },
    })
}

/// Render a coordinate in fixed-point with exactly six decimals.
///
/// Rounds the exact binary value of `value`, so `52.0277165` (stored just
/// below the tie) becomes `"52.027716"`. Values that sit exactly on a tie, such
/// as `0.0078125`, round away from zero. Negative inputs keep their sign even
/// when they round to zero. Expects a finite value.
pub fn format_coordinate(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    match exact_tie_units(value.abs()) {
        Some(units) => {
            let sign = if value < 0.0 { "-" } else { "" };
            let scale = 10u64.pow(COORDINATE_DECIMALS as u32);
            format!(
                "{sign}{}.{:0width$}",
                units / scale,
                units % scale,
                width = COORDINATE_DECIMALS
            )
        }
        None => format!("{:.*}", COORDINATE_DECIMALS, value),
    }
}

/// For a magnitude lying exactly halfway between two six-decimal values,
/// the scaled units of the value above it.
///
/// The formatter rounds such ties to even. A tie is exactly `k / 10^7` with a
/// final digit of 5, which is only representable when `k` is a multiple of
/// `5^7`.
fn exact_tie_units(magnitude: f64) -> Option<u64> {
    let digits = format!("{:.*}", COORDINATE_DECIMALS + 1, magnitude);
    if !digits.ends_with('5') || digits.parse::<f64>().ok()? != magnitude {
        return None;
    }
    let k: u64 = digits.replace('.', "").parse().ok()?;
    (k % 5u64.pow(COORDINATE_DECIMALS as u32 + 1) == 0).then_some(k / 10 + 1)
}

/// The area an operator has drawn, together with its coverage grid.
#[derive(Debug, Clone, Default)]
pub struct AreaSelection {
    selected: Option<(Rectangle, CoverageGrid)>,
}

impl AreaSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `area` and plan its grid for display.
    pub fn select(&mut self, area: Rectangle) -> &CoverageGrid {
        let grid = plan_grid(&area);
        &self.selected.insert((area, grid)).1
    }

    pub fn area(&self) -> Option<&Rectangle> {
        self.selected.as_ref().map(|(area, _)| area)
    }

    pub fn grid(&self) -> Option<&CoverageGrid> {
        self.selected.as_ref().map(|(_, grid)| grid)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Build the dispatch request for the current selection.
    pub fn dispatch_request(&self) -> Result<DispatchRequest, InvalidAreaError> {
        build_dispatch_request(self.area())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: &str, longitude: &str) -> DispatchPoint {
        DispatchPoint {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        }
    }

    #[test]
    fn formats_corners_with_six_decimals() {
        let area = Rectangle::new(17.397123456, 17.396, 78.491, 78.490);
        let request = build_dispatch_request(Some(&area)).unwrap();

        assert_eq!(request.top_left, point("17.397123", "78.490000"));
        assert_eq!(request.bottom_right, point("17.396000", "78.491000"));
    }

    #[test]
    fn wire_shape_uses_snake_case_corners() {
        let area = Rectangle::new(17.397123456, 17.396, 78.491, 78.490);
        let request = build_dispatch_request(Some(&area)).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["top_left"]["latitude"], "17.397123");
        assert_eq!(json["bottom_right"]["longitude"], "78.491000");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_coordinate(0.0078125), "0.007813");
        assert_eq!(format_coordinate(-0.0078125), "-0.007813");
        assert_eq!(format_coordinate(78.4909996), "78.491000");
        assert_eq!(format_coordinate(78.4900004), "78.490000");
    }

    #[test]
    fn rounds_the_stored_value_not_the_typed_decimal() {
        // 52.0277165 is stored as 52.02771649999..., below the tie.
        assert_eq!(format_coordinate(52.0277165), "52.027716");
        assert_eq!(format_coordinate(-52.0277165), "-52.027716");
        assert_eq!(format_coordinate(-0.25), "-0.250000");
        assert_eq!(format_coordinate(-0.0), "0.000000");
    }

    #[test]
    fn never_uses_scientific_notation() {
        assert_eq!(format_coordinate(1e-7), "0.000000");
        assert_eq!(format_coordinate(-1e-7), "-0.000000");
        assert_eq!(format_coordinate(0.0), "0.000000");
        assert_eq!(format_coordinate(-179.5), "-179.500000");
    }

    #[test]
    fn missing_area_is_rejected() {
        assert_eq!(
            build_dispatch_request(None),
            Err(InvalidAreaError::NoAreaSelected)
        );
    }

    #[test]
    fn degenerate_area_is_rejected() {
        let flat = Rectangle::new(17.397, 17.396, 78.49, 78.49);
        assert_eq!(
            build_dispatch_request(Some(&flat)),
            Err(InvalidAreaError::Degenerate(flat))
        );

        let inverted = Rectangle::new(17.396, 17.397, 78.491, 78.490);
        assert!(matches!(
            build_dispatch_request(Some(&inverted)),
            Err(InvalidAreaError::Degenerate(_))
        ));
    }

    #[test]
    fn non_finite_area_is_rejected() {
        let area = Rectangle::new(f64::INFINITY, 17.396, 78.491, 78.490);
        assert!(matches!(
            build_dispatch_request(Some(&area)),
            Err(InvalidAreaError::NonFinite(_))
        ));
    }

    #[test]
    fn selection_drives_grid_and_dispatch() {
        let mut selection = AreaSelection::new();
        assert_eq!(
            selection.dispatch_request(),
            Err(InvalidAreaError::NoAreaSelected)
        );

        let area = Rectangle::new(17.3980, 17.3960, 78.4915, 78.4890);
        assert_eq!(selection.select(area).len(), 51);
        assert_eq!(selection.area(), Some(&area));

        let request = selection.dispatch_request().unwrap();
        assert_eq!(request.top_left, point("17.398000", "78.489000"));

        selection.clear();
        assert!(selection.grid().is_none());
        assert_eq!(
            selection.dispatch_request(),
            Err(InvalidAreaError::NoAreaSelected)
        );
    }
}
