use crate::domain::{Calendar, LocationPoint};
use crate::storage::{KeyValueStore, StorageError};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// The location history: every recorded point in arrival order, mirrored to durable storage.
#[derive(Debug)]
pub struct LocationStore {
    history: Vec<LocationPoint>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    calendar: Calendar,
    degraded: bool,
}

impl LocationStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>, calendar: Calendar) -> Self {
        LocationStore {
            history: Vec::new(),
            storage,
            key: key.into(),
            calendar,
            degraded: false,
        }
    }

    /// Replaces the in-memory history with the stored one.
    ///
    /// A missing record yields an empty history. An unreadable or corrupt record also yields an
    /// empty history, marks the store as degraded and returns the cause.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn load(&mut self) -> Result<usize, StoreError> {
        info!("📂 Loading location history...");
        match self.read_history().await {
            Ok(history) => {
                self.history = history;
                self.degraded = false;
                info!("📂 Loading location history... OK, {} point(s)", self.history.len());
                Ok(self.history.len())
            }
            Err(err) => {
                self.history.clear();
                self.degraded = true;
                warn!("⚠️ Loading location history... failed, starting with an empty history: {}", err);
                Err(err)
            }
        }
    }

    async fn read_history(&self) -> Result<Vec<LocationPoint>, StoreError> {
        let Some(bytes) = self.storage.get(&self.key).await.map_err(|e| StoreError::Load(e.into()))? else {
            debug!("📂 No stored location history found");
            return Ok(Vec::new());
        };

        serde_json::from_slice(&bytes).map_err(|e| StoreError::Load(e.into()))
    }

    /// Overwrites the stored record with the full in-memory history.
    #[instrument(skip(self), fields(key = %self.key, points = self.history.len()))]
    pub async fn persist(&self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&self.history).map_err(|e| StoreError::Persist(e.into()))?;
        self.storage.set(&self.key, bytes).await.map_err(|e| StoreError::Persist(e.into()))?;

        debug!("💾 Saved {} point(s)", self.history.len());
        Ok(())
    }

    /// Appends the point and persists the history. On a persist failure the point stays recorded in memory.
    pub async fn append(&mut self, point: LocationPoint) -> Result<(), StoreError> {
        self.history.push(point);
        self.persist().await.inspect_err(|err| {
            warn!("⚠️ Could not save the location history, keeping {} point(s) in memory: {}", self.history.len(), err);
        })
    }

    pub fn points_on_day(&self, day: NaiveDate) -> Vec<LocationPoint> {
        self.history.iter().filter(|point| self.calendar.day_of(point) == day).cloned().collect()
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether the last load had to discard an unreadable history.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not load the location history: {0}")]
    Load(HistoryIoError),
    #[error("could not save the location history: {0}")]
    Persist(HistoryIoError),
}

#[derive(Error, Debug)]
pub enum HistoryIoError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayBoundary, ReferenceZone};
    use crate::storage::MemoryStore;
    use crate::storage::test_support::ReadOnlyStore;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use test_log::test;

    const KEY: &str = "saved_locations";

    fn calendar() -> Calendar {
        Calendar::new(ReferenceZone::Fixed(chrono::FixedOffset::east_opt(2 * 3600).unwrap()), DayBoundary::RecordTime)
    }

    fn point(latitude: f64, longitude: f64, timestamp: &str) -> LocationPoint {
        LocationPoint::new(latitude, longitude, DateTime::parse_from_rfc3339(timestamp).unwrap())
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test(tokio::test)]
    async fn points_on_day_returns_the_matching_points_in_insertion_order() -> Result<(), StoreError> {
        let mut store = LocationStore::new(Arc::new(MemoryStore::new()), KEY, calendar());
        let late = point(1.0, 1.0, "2024-05-01T18:00:00+02:00");
        let other_day = point(2.0, 2.0, "2024-05-02T09:00:00+02:00");
        let early = point(3.0, 3.0, "2024-05-01T07:00:00+02:00");

        store.append(late.clone()).await?;
        store.append(other_day.clone()).await?;
        store.append(early.clone()).await?;

        assert_eq!(store.points_on_day(day("2024-05-01")), vec![late, early]);
        assert_eq!(store.points_on_day(day("2024-05-02")), vec![other_day]);
        assert!(store.points_on_day(day("2024-05-03")).is_empty());
        Ok(())
    }

    #[test(tokio::test)]
    async fn points_on_day_splits_at_midnight() -> Result<(), StoreError> {
        let mut store = LocationStore::new(Arc::new(MemoryStore::new()), KEY, calendar());
        let before_midnight = point(1.0, 1.0, "2024-05-01T23:59:59+02:00");
        let after_midnight = point(1.0, 1.0, "2024-05-02T00:00:01+02:00");

        store.append(before_midnight.clone()).await?;
        store.append(after_midnight.clone()).await?;

        assert_eq!(store.points_on_day(day("2024-05-01")), vec![before_midnight]);
        assert_eq!(store.points_on_day(day("2024-05-02")), vec![after_midnight]);
        Ok(())
    }

    #[test(tokio::test)]
    async fn points_on_day_does_not_alias_the_history() -> Result<(), StoreError> {
        let mut store = LocationStore::new(Arc::new(MemoryStore::new()), KEY, calendar());
        store.append(point(1.0, 1.0, "2024-05-01T12:00:00+02:00")).await?;

        let mut points = store.points_on_day(day("2024-05-01"));
        points[0].latitude = 45.0;
        points.clear();

        assert_eq!(store.points_on_day(day("2024-05-01")), vec![point(1.0, 1.0, "2024-05-01T12:00:00+02:00")]);
        Ok(())
    }

    #[test(tokio::test)]
    async fn a_fresh_load_restores_the_persisted_history() -> Result<(), StoreError> {
        let storage = Arc::new(MemoryStore::new());
        let mut store = LocationStore::new(storage.clone(), KEY, calendar());
        let points = vec![
            LocationPoint {
                title: Some("Office".to_string()),
                subtitle: Some("Arrived".to_string()),
                ..point(52.0, 4.3, "2024-05-01T09:00:00+02:00")
            },
            point(-33.9, 151.2, "2024-04-30T23:00:00+02:00"),
        ];
        for point in points.clone() {
            store.append(point).await?;
        }

        let mut restarted = LocationStore::new(storage, KEY, calendar());
        let loaded = restarted.load().await?;

        assert_eq!(loaded, 2);
        assert_eq!(restarted.history, points);
        assert!(!restarted.is_degraded());
        Ok(())
    }

    #[test(tokio::test)]
    async fn load_is_idempotent() -> Result<(), StoreError> {
        let storage = Arc::new(MemoryStore::new());
        let mut store = LocationStore::new(storage, KEY, calendar());
        store.append(point(1.0, 1.0, "2024-05-01T12:00:00+02:00")).await?;

        store.load().await?;
        store.load().await?;

        assert_eq!(store.len(), 1);
        Ok(())
    }

    #[test(tokio::test)]
    async fn load_starts_empty_without_a_stored_history() -> Result<(), StoreError> {
        let mut store = LocationStore::new(Arc::new(MemoryStore::new()), KEY, calendar());

        assert_eq!(store.load().await?, 0);
        assert_eq!(store.len(), 0);
        assert!(!store.is_degraded());
        Ok(())
    }

    #[test(tokio::test)]
    async fn load_starts_empty_and_degraded_for_a_corrupt_history() {
        let storage = Arc::new(MemoryStore::with_entry(KEY, "[{ \"latitude\": "));
        let mut store = LocationStore::new(storage, KEY, calendar());

        let result = store.load().await;

        assert!(matches!(result, Err(StoreError::Load(HistoryIoError::Serialization(_)))));
        assert_eq!(store.len(), 0);
        assert!(store.is_degraded());
    }

    #[test(tokio::test)]
    async fn append_keeps_the_point_in_memory_when_persisting_fails() {
        let mut store = LocationStore::new(Arc::new(ReadOnlyStore), KEY, calendar());
        let recorded = point(1.0, 1.0, "2024-05-01T12:00:00+02:00");

        let result = store.append(recorded.clone()).await;

        assert!(matches!(result, Err(StoreError::Persist(HistoryIoError::Storage(StorageError::Io { .. })))));
        assert_eq!(store.points_on_day(day("2024-05-01")), vec![recorded]);
    }

    #[test(tokio::test)]
    async fn persists_the_history_record_format() -> Result<(), Box<dyn std::error::Error>> {
        let storage = Arc::new(MemoryStore::new());
        let mut store = LocationStore::new(storage.clone(), KEY, calendar());
        store.append(point(10.0, 20.0, "2024-05-01T12:00:00+02:00")).await?;

        let bytes = storage.get(KEY).await?.expect("a stored history");
        let json: serde_json::Value = serde_json::from_slice(&bytes)?;

        assert_eq!(
            json,
            serde_json::json!([{
                "latitude": 10.0,
                "longitude": 20.0,
                "timestamp": "2024-05-01T12:00:00+02:00",
                "title": null,
                "subtitle": null,
            }])
        );
        Ok(())
    }
}
