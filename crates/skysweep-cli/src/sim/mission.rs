//! Simulated sweep missions recorded as flight logs.

use chrono::{DateTime, Duration, Utc};
use skysweep_core::{
    plan_grid, EventType, FinalizedLogError, FlightEvent, FlightLog, GeoLocation, Rectangle,
    TelemetrySample,
};

use super::paths::{FlightPath, SweepPath};

/// Parameters for a simulated sweep.
#[derive(Debug, Clone)]
pub struct SweepMission {
    pub drone_id: String,
    pub area: Rectangle,
    pub altitude_m: f64,
    pub speed_mps: f64,
    /// Seconds between telemetry samples.
    pub sample_interval: f64,
    pub start_time: DateTime<Utc>,
}

impl SweepMission {
    /// Fly the serpentine sweep over `area` and return the finalized log.
    ///
    /// The log opens with a takeoff at the first waypoint and closes with a
    /// landing at the last. Telemetry timestamps are seconds since the start
    /// of the mission.
    pub fn fly(&self) -> Result<FlightLog, FinalizedLogError> {
        let grid = plan_grid(&self.area);
        let path = SweepPath::new(&grid, self.altitude_m, self.speed_mps);
        let duration = path.duration();
        let step = if self.sample_interval > 0.0 {
            self.sample_interval
        } else {
            1.0
        };

        let mut log = FlightLog::new(self.drone_id.clone(), self.start_time);

        let (lat, lon, _) = path.get_position(0.0);
        log.record_event(self.event(EventType::Takeoff, 0.0, lat, lon))?;

        let mut t = 0.0;
        loop {
            let (latitude, longitude, altitude) = path.get_position(t);
            log.record_sample(TelemetrySample {
                timestamp: t.round() as i64,
                latitude,
                longitude,
                altitude,
                groundspeed: path.get_speed_mps(),
            })?;
            if t >= duration {
                break;
            }
            t = (t + step).min(duration);
        }

        let (lat, lon, _) = path.get_position(duration);
        log.record_event(self.event(EventType::Landing, duration, lat, lon))?;
        log.finalize(self.at(duration))?;
        Ok(log)
    }

    fn at(&self, seconds: f64) -> DateTime<Utc> {
        self.start_time + Duration::milliseconds((seconds * 1000.0).round() as i64)
    }

    fn event(&self, event_type: EventType, seconds: f64, latitude: f64, longitude: f64) -> FlightEvent {
        FlightEvent {
            event_type,
            timestamp: self.at(seconds),
            location: GeoLocation {
                latitude,
                longitude,
            },
        }
    }
}
