//! Mock measurement store for testing.
//!
//! Provides an in-memory [`MockStore`] implementing [`MeasurementStore`],
//! so controllers can be exercised without a network. Besides holding rows,
//! the mock keeps audit logs of uploaded and deleted photo objects and
//! supports failure injection.
//!
//! # Example
//!
//! ```
//! use airnote_client::{MeasurementStore, MockStore};
//! use airnote_types::{GeoPoint, Measurement};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MockStore::new();
//!
//!     let mut m = Measurement::new("Office");
//!     m.set_point(GeoPoint::new(-23.55, -46.63));
//!     store.insert(&m, None).await.unwrap();
//!
//!     assert_eq!(store.list().await.unwrap().len(), 1);
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use airnote_types::Measurement;

use crate::error::{Error, Result};
use crate::store::MeasurementStore;

/// An in-memory measurement store for testing.
///
/// Mirrors the photo lifecycle of the REST store: uploads happen before row
/// writes, replacement deletes the previously stored object, and row
/// deletion removes the row's object. Ids and creation timestamps are
/// assigned on insert, as the backend would.
#[derive(Debug, Default)]
pub struct MockStore {
    rows: RwLock<Vec<Measurement>>,
    uploaded_photos: RwLock<Vec<String>>,
    deleted_photos: RwLock<Vec<String>>,
    should_fail: AtomicBool,
    fail_message: RwLock<Option<String>>,
}

impl MockStore {
    /// Create an empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store with rows, assigning ids where missing.
    pub async fn seed(&self, measurements: Vec<Measurement>) {
        let mut rows = self.rows.write().await;
        for mut measurement in measurements {
            if measurement.id.is_none() {
                measurement.id = Some(Uuid::new_v4().to_string());
            }
            rows.push(measurement);
        }
    }

    /// Make every subsequent operation fail with a backend error.
    pub fn set_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    /// Set the message reported by injected failures.
    pub async fn set_fail_message(&self, message: impl Into<String>) {
        *self.fail_message.write().await = Some(message.into());
    }

    /// Photo object URLs uploaded so far, in order.
    pub async fn uploaded_photos(&self) -> Vec<String> {
        self.uploaded_photos.read().await.clone()
    }

    /// Photo object URLs deleted so far, in order.
    pub async fn deleted_photos(&self) -> Vec<String> {
        self.deleted_photos.read().await.clone()
    }

    /// Current number of stored rows.
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }

    async fn check_failure(&self) -> Result<()> {
        if self.should_fail.load(Ordering::Relaxed) {
            let message = self
                .fail_message
                .read()
                .await
                .clone()
                .unwrap_or_else(|| "Injected mock failure".to_string());
            return Err(Error::Api {
                status: 500,
                message,
            });
        }
        Ok(())
    }

    async fn stage_photo(&self) -> String {
        let url = format!("mock://photos/public/{}.jpg", Uuid::new_v4());
        self.uploaded_photos.write().await.push(url.clone());
        url
    }

    async fn discard_photo(&self, photo_url: &str) {
        self.deleted_photos.write().await.push(photo_url.to_string());
    }
}

#[async_trait]
impl MeasurementStore for MockStore {
    async fn list(&self) -> Result<Vec<Measurement>> {
        self.check_failure().await?;
        Ok(self.rows.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Measurement>> {
        self.check_failure().await?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|row| row.id.as_deref() == Some(id))
            .cloned())
    }

    async fn insert(&self, measurement: &Measurement, photo: Option<&[u8]>) -> Result<()> {
        self.check_failure().await?;

        let mut row = measurement.clone();
        row.id = Some(Uuid::new_v4().to_string());
        row.created_at = Some(OffsetDateTime::now_utc());
        if photo.is_some() {
            row.photo_url = Some(self.stage_photo().await);
        }

        self.rows.write().await.push(row);
        Ok(())
    }

    async fn update(&self, measurement: &Measurement, photo: Option<&[u8]>) -> Result<()> {
        self.check_failure().await?;

        let id = measurement.id.clone().ok_or(Error::MissingId)?;

        // Replacement is resolved against the stored row, as the backend
        // store does.
        let old_photo = self
            .rows
            .read()
            .await
            .iter()
            .find(|row| row.id.as_deref() == Some(id.as_str()))
            .and_then(|row| row.photo_url.clone());

        let mut row = measurement.clone();
        if photo.is_some() {
            if let Some(old_url) = old_photo {
                self.discard_photo(&old_url).await;
            }
            row.photo_url = Some(self.stage_photo().await);
        }

        let mut rows = self.rows.write().await;
        if let Some(existing) = rows.iter_mut().find(|r| r.id.as_deref() == Some(id.as_str())) {
            row.created_at = existing.created_at;
            *existing = row;
        }
        // A filter update against a missing id matches zero rows; not an error.
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.check_failure().await?;

        let mut rows = self.rows.write().await;
        if let Some(position) = rows.iter().position(|row| row.id.as_deref() == Some(id)) {
            let removed = rows.remove(position);
            drop(rows);
            if let Some(photo_url) = removed.photo_url {
                self.discard_photo(&photo_url).await;
            }
        }
        // A filter delete against a missing id matches zero rows; not an error.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use airnote_types::GeoPoint;

    use super::*;

    fn sample(name: &str) -> Measurement {
        let mut m = Measurement::new(name);
        m.set_point(GeoPoint::new(-23.5505, -46.6333));
        m
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_created_at() {
        let store = MockStore::new();
        store.insert(&sample("Office"), None).await.unwrap();

        let rows = store.list().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].id.is_some());
        assert!(rows[0].created_at.is_some());
    }

    #[tokio::test]
    async fn test_insert_with_photo_records_one_upload() {
        let store = MockStore::new();
        store.insert(&sample("Office"), Some(&[0xFF, 0xD8])).await.unwrap();

        assert_eq!(store.uploaded_photos().await.len(), 1);
        assert!(store.deleted_photos().await.is_empty());

        let rows = store.list().await.unwrap();
        assert!(rows[0].photo_url.is_some());
    }

    #[tokio::test]
    async fn test_photo_replacement_deletes_exactly_one_object() {
        let store = MockStore::new();
        store.insert(&sample("Office"), Some(&[1, 2, 3])).await.unwrap();

        let stored = store.list().await.unwrap().remove(0);
        let first_url = stored.photo_url.clone().unwrap();

        // The caller replaces the photo; its own reference to the old URL
        // has already been cleared by the capture step.
        let mut updated = stored.clone();
        updated.photo_url = None;
        store.update(&updated, Some(&[4, 5, 6])).await.unwrap();

        assert_eq!(store.deleted_photos().await, vec![first_url]);
        assert_eq!(store.uploaded_photos().await.len(), 2);
    }

    #[tokio::test]
    async fn test_update_without_photo_keeps_url() {
        let store = MockStore::new();
        store.insert(&sample("Office"), Some(&[1])).await.unwrap();

        let mut stored = store.list().await.unwrap().remove(0);
        let photo_url = stored.photo_url.clone();
        stored.location_name = "Office, 2nd floor".to_string();
        store.update(&stored, None).await.unwrap();

        let rows = store.list().await.unwrap();
        assert_eq!(rows[0].location_name, "Office, 2nd floor");
        assert_eq!(rows[0].photo_url, photo_url);
        assert!(store.deleted_photos().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let store = MockStore::new();
        let result = store.update(&sample("Office"), None).await;
        assert!(matches!(result, Err(Error::MissingId)));
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_photo() {
        let store = MockStore::new();
        store.insert(&sample("Office"), Some(&[1])).await.unwrap();

        let stored = store.list().await.unwrap().remove(0);
        store.delete(stored.id.as_deref().unwrap()).await.unwrap();

        assert_eq!(store.row_count().await, 0);
        assert_eq!(store.deleted_photos().await.len(), 1);

        // Idempotent: deleting again matches zero rows.
        store.delete(stored.id.as_deref().unwrap()).await.unwrap();
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MockStore::new();
        store.set_fail_message("backend down").await;
        store.set_fail(true);

        let error = store.list().await.unwrap_err();
        assert!(error.to_string().contains("backend down"));

        store.set_fail(false);
        assert!(store.list().await.is_ok());
    }
}
