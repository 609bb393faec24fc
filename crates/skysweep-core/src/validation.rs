//! Schema checks applied to a flight log before it is persisted.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{FlightEvent, FlightLog, FlightSummary, TelemetrySample};

/// A flight log that violates the data model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required scalar field is absent or blank.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The summary closes before it opens.
    #[error("flight_summary.end_time {end} is earlier than start_time {start}")]
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A quantity that must be a finite, non-negative number.
    #[error("`{field}` must be a finite non-negative number, got {value}")]
    NegativeOrNonFinite { field: String, value: f64 },

    #[error("`{field}` latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange { field: String, value: f64 },

    #[error("`{field}` longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange { field: String, value: f64 },

    /// Telemetry samples must be appended in time order.
    #[error("telemetry[{index}] timestamp {timestamp} precedes previous sample at {previous}")]
    TelemetryOutOfOrder {
        index: usize,
        timestamp: i64,
        previous: i64,
    },
}

impl FlightLog {
    /// Check every field constraint of the log, stopping at the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.drone_id.trim().is_empty() {
            return Err(ValidationError::MissingField("drone_id"));
        }

        validate_summary(&self.flight_summary)?;

        for (index, event) in self.events.iter().enumerate() {
            validate_event(index, event)?;
        }

        let mut previous: Option<i64> = None;
        for (index, sample) in self.telemetry.iter().enumerate() {
            validate_sample(index, sample)?;
            if let Some(previous) = previous {
                if sample.timestamp < previous {
                    return Err(ValidationError::TelemetryOutOfOrder {
                        index,
                        timestamp: sample.timestamp,
                        previous,
                    });
                }
            }
            previous = Some(sample.timestamp);
        }

        Ok(())
    }
}

fn validate_summary(summary: &FlightSummary) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (summary.start_time, summary.end_time) {
        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end });
        }
    }

    non_negative("flight_summary.max_altitude", summary.max_altitude)?;
    non_negative("flight_summary.average_speed", summary.average_speed)?;
    non_negative("flight_summary.distance_traveled", summary.distance_traveled)
}

fn validate_event(index: usize, event: &FlightEvent) -> Result<(), ValidationError> {
    if event.event_type.as_str().trim().is_empty() {
        return Err(ValidationError::MissingField("events.event_type"));
    }
    let field = format!("events[{index}].location");
    coordinates(&field, event.location.latitude, event.location.longitude)
}

fn validate_sample(index: usize, sample: &TelemetrySample) -> Result<(), ValidationError> {
    let field = format!("telemetry[{index}]");
    coordinates(&field, sample.latitude, sample.longitude)?;
    non_negative(&format!("{field}.altitude"), sample.altitude)?;
    non_negative(&format!("{field}.groundspeed"), sample.groundspeed)
}

fn coordinates(field: &str, latitude: f64, longitude: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange {
            field: field.to_string(),
            value: latitude,
        });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange {
            field: field.to_string(),
            value: longitude,
        });
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NegativeOrNonFinite {
            field: field.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_flight_log;
    use chrono::Duration;

    #[test]
    fn sample_log_is_valid() {
        assert_eq!(sample_flight_log().validate(), Ok(()));
    }

    #[test]
    fn rejects_blank_drone_id() {
        let mut log = sample_flight_log();
        log.drone_id = "  ".to_string();
        assert_eq!(
            log.validate(),
            Err(ValidationError::MissingField("drone_id"))
        );
    }

    #[test]
    fn rejects_end_before_start() {
        let mut log = sample_flight_log();
        let start = log.flight_summary.start_time.unwrap();
        log.flight_summary.end_time = Some(start - Duration::seconds(1));
        assert!(matches!(
            log.validate(),
            Err(ValidationError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn accepts_equal_start_and_end() {
        let mut log = sample_flight_log();
        log.flight_summary.end_time = log.flight_summary.start_time;
        assert_eq!(log.validate(), Ok(()));
    }

    #[test]
    fn accepts_open_mission() {
        let mut log = sample_flight_log();
        log.flight_summary.end_time = None;
        assert_eq!(log.validate(), Ok(()));
    }

    #[test]
    fn rejects_negative_altitude() {
        let mut log = sample_flight_log();
        log.flight_summary.max_altitude = -1.0;
        assert!(matches!(
            log.validate(),
            Err(ValidationError::NegativeOrNonFinite { ref field, .. })
                if field == "flight_summary.max_altitude"
        ));

        let mut log = sample_flight_log();
        log.telemetry[2].altitude = -0.5;
        assert!(matches!(
            log.validate(),
            Err(ValidationError::NegativeOrNonFinite { ref field, .. })
                if field == "telemetry[2].altitude"
        ));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let mut log = sample_flight_log();
        log.events[1].location.latitude = 91.0;
        assert!(matches!(
            log.validate(),
            Err(ValidationError::LatitudeOutOfRange { ref field, .. })
                if field == "events[1].location"
        ));

        let mut log = sample_flight_log();
        log.telemetry[0].longitude = f64::NAN;
        assert!(matches!(
            log.validate(),
            Err(ValidationError::LongitudeOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_telemetry_going_backwards() {
        let mut log = sample_flight_log();
        log.telemetry[3].timestamp = 100;
        assert_eq!(
            log.validate(),
            Err(ValidationError::TelemetryOutOfOrder {
                index: 3,
                timestamp: 100,
                previous: 135200,
            })
        );
    }

    #[test]
    fn rejects_blank_event_type() {
        let mut log = sample_flight_log();
        log.events[0].event_type = "".into();
        assert_eq!(
            log.validate(),
            Err(ValidationError::MissingField("events.event_type"))
        );
    }
}
