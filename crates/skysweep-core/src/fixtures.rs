//! Reference mission used for seeding and tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
    EventType, FlightEvent, FlightLog, FlightSummary, GeoLocation, TelemetrySample,
};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 13, hour, min, 0)
        .single()
        .unwrap_or_default()
}

fn event(event_type: EventType, time: DateTime<Utc>, latitude: f64, longitude: f64) -> FlightEvent {
    FlightEvent {
        event_type,
        timestamp: time,
        location: GeoLocation {
            latitude,
            longitude,
        },
    }
}

fn sample(
    timestamp: i64,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    groundspeed: f64,
) -> TelemetrySample {
    TelemetrySample {
        timestamp,
        latitude,
        longitude,
        altitude,
        groundspeed,
    }
}

/// Thirty-minute search-and-drop mission flown by `drone001`.
pub fn sample_flight_log() -> FlightLog {
    FlightLog {
        drone_id: "drone001".to_string(),
        flight_summary: FlightSummary {
            start_time: Some(at(10, 0)),
            end_time: Some(at(10, 30)),
            max_altitude: 45.0,
            average_speed: 3.7,
            distance_traveled: 1000.0,
        },
        events: vec![
            event(EventType::Takeoff, at(10, 0), 17.3969, 78.4900),
            event(EventType::PersonDetected, at(10, 10), 17.3971, 78.4905),
            event(EventType::PayloadDropped, at(10, 15), 17.3980, 78.4910),
            event(EventType::Landing, at(10, 30), 17.3969, 78.4900),
        ],
        telemetry: vec![
            sample(135000, 17.3969, 78.4900, 10.0, 0.0),
            sample(135100, 17.3970, 78.4901, 15.0, 2.0),
            sample(135200, 17.3971, 78.4902, 20.0, 3.5),
            sample(135300, 17.3972, 78.4903, 25.0, 4.0),
            sample(135400, 17.3973, 78.4904, 30.0, 3.8),
            sample(135500, 17.3974, 78.4905, 35.0, 3.6),
        ],
    }
}
