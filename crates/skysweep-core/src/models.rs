//! Core data models for flight logs and mission area planning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::spatial::haversine_distance;

/// Durable record of one mission: summary, discrete events and telemetry.
///
/// Events and telemetry are owned by the log and kept in append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightLog {
    /// Missing in a payload deserializes as empty and fails validation.
    #[serde(default)]
    pub drone_id: String,
    #[serde(default)]
    pub flight_summary: FlightSummary,
    #[serde(default)]
    pub events: Vec<FlightEvent>,
    #[serde(default)]
    pub telemetry: Vec<TelemetrySample>,
}

/// Mission-level figures. Times stay unset until the mission reaches them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightSummary {
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Meters
    #[serde(default)]
    pub max_altitude: f64,
    /// Meters per second
    #[serde(default)]
    pub average_speed: f64,
    /// Meters
    #[serde(default)]
    pub distance_traveled: f64,
}

/// A discrete, located occurrence during a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightEvent {
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub location: GeoLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// One timestamped position/altitude/speed reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Epoch-style counter; must not decrease across a log.
    pub timestamp: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub groundspeed: f64,
}

/// Kind of flight event. Unknown kinds are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Takeoff,
    PersonDetected,
    PayloadDropped,
    Landing,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Takeoff => "takeoff",
            EventType::PersonDetected => "person_detected",
            EventType::PayloadDropped => "payload_dropped",
            EventType::Landing => "landing",
            EventType::Other(other) => other.as_str(),
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "takeoff" => EventType::Takeoff,
            "person_detected" => EventType::PersonDetected,
            "payload_dropped" => EventType::PayloadDropped,
            "landing" => EventType::Landing,
            _ => EventType::Other(value),
        }
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        EventType::from(value.to_string())
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque key assigned to a flight log when it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredId(pub String);

impl fmt::Display for StoredId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted flight log together with its storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFlightLog {
    pub id: StoredId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub log: FlightLog,
}

/// Returned when an in-memory log is extended after `finalize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("flight log is finalized and can no longer be modified")]
pub struct FinalizedLogError;

impl FlightLog {
    /// Start a new log for a mission beginning at `start_time`.
    pub fn new(drone_id: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            drone_id: drone_id.into(),
            flight_summary: FlightSummary {
                start_time: Some(start_time),
                ..FlightSummary::default()
            },
            events: Vec::new(),
            telemetry: Vec::new(),
        }
    }

    /// A log is finalized once its end time is set.
    pub fn is_finalized(&self) -> bool {
        self.flight_summary.end_time.is_some()
    }

    pub fn record_event(&mut self, event: FlightEvent) -> Result<(), FinalizedLogError> {
        if self.is_finalized() {
            return Err(FinalizedLogError);
        }
        self.events.push(event);
        Ok(())
    }

    pub fn record_sample(&mut self, sample: TelemetrySample) -> Result<(), FinalizedLogError> {
        if self.is_finalized() {
            return Err(FinalizedLogError);
        }
        self.telemetry.push(sample);
        Ok(())
    }

    /// Close the mission at `end_time` and derive the summary figures from
    /// the recorded telemetry.
    pub fn finalize(&mut self, end_time: DateTime<Utc>) -> Result<(), FinalizedLogError> {
        if self.is_finalized() {
            return Err(FinalizedLogError);
        }
        self.flight_summary = FlightSummary::from_telemetry(
            &self.telemetry,
            self.flight_summary.start_time,
            Some(end_time),
        );
        Ok(())
    }
}

impl FlightSummary {
    /// Derive max altitude, mean groundspeed and great-circle path length.
    pub fn from_telemetry(
        samples: &[TelemetrySample],
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        let max_altitude = samples
            .iter()
            .map(|sample| sample.altitude)
            .fold(0.0_f64, f64::max);

        let average_speed = if samples.is_empty() {
            0.0
        } else {
            samples.iter().map(|sample| sample.groundspeed).sum::<f64>() / samples.len() as f64
        };

        let distance_traveled = samples
            .windows(2)
            .map(|pair| {
                haversine_distance(
                    pair[0].latitude,
                    pair[0].longitude,
                    pair[1].latitude,
                    pair[1].longitude,
                )
            })
            .sum();

        Self {
            start_time,
            end_time,
            max_altitude,
            average_speed,
            distance_traveled,
        }
    }
}

/// Operator-drawn area in decimal degrees.
///
/// Well-formed rectangles have `north > south` and `east > west`. Areas that
/// cross the antimeridian must be split by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Rectangle {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.north.is_finite()
            && self.south.is_finite()
            && self.east.is_finite()
            && self.west.is_finite()
    }

    /// True when the area has no extent (or is inverted) on either axis.
    pub fn is_degenerate(&self) -> bool {
        !(self.north > self.south && self.east > self.west)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One scan line of a coverage grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub start: LatLng,
    pub end: LatLng,
}

/// Ordered scan lines covering a rectangle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageGrid {
    pub lines: Vec<GridLine>,
}

impl CoverageGrid {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Longitudes of the scan lines in emission order.
    pub fn longitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.lines.iter().map(|line| line.start.lng)
    }
}

/// Corner of a dispatch area, each coordinate fixed to 6 decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPoint {
    pub latitude: String,
    pub longitude: String,
}

/// Normalized wire request for the drone-dispatch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub top_left: DispatchPoint,
    pub bottom_right: DispatchPoint,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(timestamp: i64, latitude: f64, altitude: f64, groundspeed: f64) -> TelemetrySample {
        TelemetrySample {
            timestamp,
            latitude,
            longitude: 78.49,
            altitude,
            groundspeed,
        }
    }

    #[test]
    fn event_type_keeps_unknown_kinds() {
        let parsed: EventType = serde_json::from_str("\"battery_low\"").unwrap();
        assert_eq!(parsed, EventType::Other("battery_low".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"battery_low\"");

        let known: EventType = serde_json::from_str("\"person_detected\"").unwrap();
        assert_eq!(known, EventType::PersonDetected);
    }

    #[test]
    fn missing_drone_id_deserializes_as_empty() {
        let log: FlightLog = serde_json::from_str(r#"{"events": [], "telemetry": []}"#).unwrap();
        assert!(log.drone_id.is_empty());
        assert!(log.flight_summary.start_time.is_none());
    }

    #[test]
    fn summary_from_telemetry() {
        let samples = vec![
            sample(1, 17.3969, 10.0, 0.0),
            sample(2, 17.3979, 30.0, 4.0),
            sample(3, 17.3989, 20.0, 2.0),
        ];
        let summary = FlightSummary::from_telemetry(&samples, None, None);

        assert_eq!(summary.max_altitude, 30.0);
        assert!((summary.average_speed - 2.0).abs() < 1e-9);
        // Two 0.001 degree latitude legs, roughly 111 m each
        assert!((summary.distance_traveled - 222.4).abs() < 1.0);
    }

    #[test]
    fn finalized_log_rejects_new_records() {
        let start = Utc.with_ymd_and_hms(2024, 11, 13, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 11, 13, 10, 30, 0).unwrap();
        let mut log = FlightLog::new("drone001", start);
        log.record_sample(sample(1, 17.3969, 12.0, 3.0)).unwrap();
        assert!(!log.is_finalized());

        log.finalize(end).unwrap();
        assert!(log.is_finalized());
        assert_eq!(log.flight_summary.start_time, Some(start));
        assert_eq!(log.flight_summary.max_altitude, 12.0);

        assert_eq!(
            log.record_sample(sample(2, 17.3970, 5.0, 1.0)),
            Err(FinalizedLogError)
        );
        assert_eq!(log.finalize(end), Err(FinalizedLogError));
    }

    #[test]
    fn degenerate_rectangles() {
        assert!(!Rectangle::new(17.4, 17.3, 78.5, 78.4).is_degenerate());
        assert!(Rectangle::new(17.4, 17.3, 78.4, 78.4).is_degenerate());
        assert!(Rectangle::new(17.3, 17.3, 78.5, 78.4).is_degenerate());
        assert!(Rectangle::new(17.3, 17.4, 78.5, 78.4).is_degenerate());
        assert!(Rectangle::new(f64::NAN, 17.3, 78.5, 78.4).is_degenerate());
    }
}
