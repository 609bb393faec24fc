//! Flight paths over a coverage grid.

use skysweep_core::{haversine_distance, CoverageGrid, LatLng};

/// Trait for flight path implementations.
pub trait FlightPath: Send + Sync {
    /// Get (lat, lon, altitude_m) at time t seconds from start.
    fn get_position(&self, t: f64) -> (f64, f64, f64);

    /// Get speed in meters per second.
    fn get_speed_mps(&self) -> f64;

    /// Seconds needed to fly the whole path.
    fn duration(&self) -> f64;
}

/// Serpentine sweep that flies every grid line, alternating direction.
pub struct SweepPath {
    waypoints: Vec<LatLng>,
    /// Cumulative distance in meters at each waypoint.
    offsets: Vec<f64>,
    pub altitude_m: f64,
    pub speed_mps: f64,
}

impl SweepPath {
    pub fn new(grid: &CoverageGrid, altitude_m: f64, speed_mps: f64) -> Self {
        let waypoints: Vec<LatLng> = grid
            .lines
            .iter()
            .enumerate()
            .flat_map(|(i, line)| {
                if i % 2 == 0 {
                    [line.start, line.end]
                } else {
                    [line.end, line.start]
                }
            })
            .collect();

        let mut offsets = Vec::with_capacity(waypoints.len());
        let mut total = 0.0;
        for (i, point) in waypoints.iter().enumerate() {
            if i > 0 {
                let prev = waypoints[i - 1];
                total += haversine_distance(prev.lat, prev.lng, point.lat, point.lng);
            }
            offsets.push(total);
        }

        Self {
            waypoints,
            offsets,
            altitude_m,
            speed_mps,
        }
    }

    /// Total path length in meters.
    pub fn length_m(&self) -> f64 {
        self.offsets.last().copied().unwrap_or(0.0)
    }
}

impl FlightPath for SweepPath {
    fn get_position(&self, t: f64) -> (f64, f64, f64) {
        let Some(first) = self.waypoints.first() else {
            return (0.0, 0.0, self.altitude_m);
        };

        let travelled = (t.max(0.0) * self.speed_mps).min(self.length_m());
        let leg = self
            .offsets
            .iter()
            .rposition(|offset| *offset <= travelled)
            .unwrap_or(0);

        let Some(next) = self.waypoints.get(leg + 1) else {
            let last = self.waypoints.last().unwrap_or(first);
            return (last.lat, last.lng, self.altitude_m);
        };
        let here = self.waypoints[leg];
        let leg_len = self.offsets[leg + 1] - self.offsets[leg];
        let progress = if leg_len > 0.0 {
            (travelled - self.offsets[leg]) / leg_len
        } else {
            0.0
        };

        (
            here.lat + progress * (next.lat - here.lat),
            here.lng + progress * (next.lng - here.lng),
            self.altitude_m,
        )
    }

    fn get_speed_mps(&self) -> f64 {
        self.speed_mps
    }

    fn duration(&self) -> f64 {
        if self.speed_mps > 0.0 {
            self.length_m() / self.speed_mps
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skysweep_core::{plan_grid, Rectangle};

    fn area() -> Rectangle {
        Rectangle::new(17.398, 17.396, 78.4915, 78.489)
    }

    #[test]
    fn test_sweep_starts_at_first_line() {
        let grid = plan_grid(&area());
        let path = SweepPath::new(&grid, 40.0, 5.0);
        let (lat, lon, alt) = path.get_position(0.0);

        assert!((lat - 17.396).abs() < 1e-9);
        assert!((lon - 78.489).abs() < 1e-9);
        assert!((alt - 40.0).abs() < 0.01);
    }

    #[test]
    fn test_sweep_ends_on_last_line() {
        let grid = plan_grid(&area());
        let path = SweepPath::new(&grid, 40.0, 5.0);
        let (_, lon, _) = path.get_position(path.duration() + 100.0);

        assert!((lon - 78.4915).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_alternates_direction() {
        let grid = plan_grid(&area());
        let path = SweepPath::new(&grid, 40.0, 5.0);

        assert_eq!(path.waypoints.len(), 102);
        assert_eq!(path.waypoints[1], grid.lines[0].end);
        assert_eq!(path.waypoints[2], grid.lines[1].end);
        assert_eq!(path.waypoints[3], grid.lines[1].start);
        assert!(path.length_m() > 0.0);
    }

    #[test]
    fn test_empty_grid_has_no_duration() {
        let path = SweepPath::new(&CoverageGrid::default(), 40.0, 5.0);
        assert_eq!(path.duration(), 0.0);
        assert_eq!(path.get_position(10.0), (0.0, 0.0, 40.0));
    }
}
