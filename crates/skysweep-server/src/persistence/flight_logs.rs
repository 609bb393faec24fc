//! Flight log persistence operations.

use chrono::{DateTime, Utc};
use skysweep_core::{
    FlightEvent, FlightLog, FlightSummary, StoredFlightLog, StoredId, TelemetrySample,
};

use super::db::Database;
use super::error::{StoreError, StoreResult};

/// Append-only store of flight logs backed by SQLite.
///
/// Each log is one row; its summary, events and telemetry are JSON documents
/// owned by that row. Reads return rows in insertion order.
#[derive(Clone)]
pub struct TelemetryStore {
    db: Database,
}

impl TelemetryStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Validate and persist `log`, returning its new id.
    pub async fn save(&self, log: &FlightLog) -> StoreResult<StoredId> {
        log.validate()?;

        let id = StoredId(uuid::Uuid::new_v4().to_string());
        let summary_json = serde_json::to_string(&log.flight_summary)?;
        let events_json = serde_json::to_string(&log.events)?;
        let telemetry_json = serde_json::to_string(&log.telemetry)?;

        sqlx::query(
            r#"
            INSERT INTO flight_logs (
                flight_log_id, drone_id, start_time, end_time,
                flight_summary, events, telemetry, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&id.0)
        .bind(&log.drone_id)
        .bind(log.flight_summary.start_time.map(|t| t.to_rfc3339()))
        .bind(log.flight_summary.end_time.map(|t| t.to_rfc3339()))
        .bind(&summary_json)
        .bind(&events_json)
        .bind(&telemetry_json)
        .bind(Utc::now().to_rfc3339())
        .execute(self.db.pool())
        .await?;

        tracing::info!(
            flight_log_id = %id,
            drone_id = %log.drone_id,
            events = log.events.len(),
            samples = log.telemetry.len(),
            "Saved flight log"
        );

        Ok(id)
    }

    /// Load every stored log in insertion order.
    pub async fn find_all(&self) -> StoreResult<Vec<StoredFlightLog>> {
        let rows = sqlx::query_as::<_, FlightLogRow>(
            "SELECT flight_log_id, drone_id, flight_summary, events, telemetry, created_at FROM flight_logs ORDER BY seq",
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.into_iter().map(StoredFlightLog::try_from).collect()
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM flight_logs")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct FlightLogRow {
    flight_log_id: String,
    drone_id: String,
    flight_summary: String,
    events: String,
    telemetry: String,
    created_at: String,
}

impl TryFrom<FlightLogRow> for StoredFlightLog {
    type Error = StoreError;

    fn try_from(row: FlightLogRow) -> StoreResult<Self> {
        let corrupt = |message: String| StoreError::Corrupt {
            id: row.flight_log_id.clone(),
            message,
        };

        let flight_summary: FlightSummary = serde_json::from_str(&row.flight_summary)
            .map_err(|e| corrupt(format!("flight_summary: {e}")))?;
        let events: Vec<FlightEvent> =
            serde_json::from_str(&row.events).map_err(|e| corrupt(format!("events: {e}")))?;
        let telemetry: Vec<TelemetrySample> = serde_json::from_str(&row.telemetry)
            .map_err(|e| corrupt(format!("telemetry: {e}")))?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| corrupt(format!("created_at: {e}")))?;

        Ok(StoredFlightLog {
            id: StoredId(row.flight_log_id.clone()),
            created_at,
            log: FlightLog {
                drone_id: row.drone_id,
                flight_summary,
                events,
                telemetry,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::db::TempDatabase;
    use chrono::Duration;
    use skysweep_core::{sample_flight_log, EventType, ValidationError};

    async fn temp_store() -> (TelemetryStore, TempDatabase) {
        let temp = TempDatabase::open("skysweep-store").await;
        (TelemetryStore::new(temp.db.clone()), temp)
    }

    #[tokio::test]
    async fn save_then_find_all_preserves_order() {
        let (store, _temp) = temp_store().await;
        let sample = sample_flight_log();

        let id = store.save(&sample).await.unwrap();
        let logs = store.find_all().await.unwrap();

        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, id);
        assert_eq!(logs[0].log.drone_id, "drone001");
        assert_eq!(logs[0].log.flight_summary.start_time, sample.flight_summary.start_time);
        assert_eq!(logs[0].log.flight_summary.end_time, sample.flight_summary.end_time);
        assert_eq!(logs[0].log.events.len(), 4);
        assert_eq!(logs[0].log.telemetry.len(), 6);
        let kinds: Vec<&EventType> = logs[0].log.events.iter().map(|e| &e.event_type).collect();
        assert_eq!(
            kinds,
            vec![
                &EventType::Takeoff,
                &EventType::PersonDetected,
                &EventType::PayloadDropped,
                &EventType::Landing
            ]
        );
        let stamps: Vec<i64> = logs[0].log.telemetry.iter().map(|s| s.timestamp).collect();
        assert_eq!(stamps, vec![135000, 135100, 135200, 135300, 135400, 135500]);
    }

    #[tokio::test]
    async fn logs_come_back_in_insertion_order() {
        let (store, _temp) = temp_store().await;
        for drone in ["drone003", "drone001", "drone002"] {
            let mut log = sample_flight_log();
            log.drone_id = drone.to_string();
            store.save(&log).await.unwrap();
        }

        let drones: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|stored| stored.log.drone_id)
            .collect();
        assert_eq!(drones, vec!["drone003", "drone001", "drone002"]);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn rejects_end_before_start_without_writing() {
        let (store, _temp) = temp_store().await;
        let mut log = sample_flight_log();
        let start = log.flight_summary.start_time.unwrap();
        log.flight_summary.end_time = Some(start - Duration::minutes(5));

        let err = store.save(&log).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::EndBeforeStart { .. })
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn accepts_equal_start_and_end() {
        let (store, _temp) = temp_store().await;
        let mut log = sample_flight_log();
        log.flight_summary.end_time = log.flight_summary.start_time;

        store.save(&log).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn rejects_missing_drone_id() {
        let (store, _temp) = temp_store().await;
        let mut log = sample_flight_log();
        log.drone_id.clear();

        let err = store.save(&log).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::MissingField("drone_id"))
        ));
    }

    #[tokio::test]
    async fn closed_store_is_unavailable() {
        let (store, _temp) = temp_store().await;
        store.database().close().await;

        assert!(store.find_all().await.unwrap_err().is_unavailable());
        assert!(store
            .save(&sample_flight_log())
            .await
            .unwrap_err()
            .is_unavailable());
    }

    #[tokio::test]
    async fn undecodable_row_is_reported_as_corrupt() {
        let (store, _temp) = temp_store().await;
        sqlx::query(
            "INSERT INTO flight_logs (flight_log_id, drone_id, flight_summary, events, telemetry, created_at) VALUES ('bad-row', 'drone009', '{}', 'not json', '[]', '2024-11-13T10:00:00Z')",
        )
        .execute(store.database().pool())
        .await
        .unwrap();

        match store.find_all().await {
            Err(StoreError::Corrupt { id, message }) => {
                assert_eq!(id, "bad-row");
                assert!(message.starts_with("events"));
            }
            other => panic!("expected corrupt row, got {other:?}"),
        }
    }
}
