//! Trait abstraction for measurement persistence.

use async_trait::async_trait;

use airnote_types::Measurement;

use crate::error::Result;

/// Trait abstracting the remote measurement store.
///
/// This trait enables writing controllers that work with both the real REST
/// backend ([`crate::RestStore`]) and an in-memory store for testing
/// ([`crate::MockStore`]).
///
/// # Photo lifecycle
///
/// `insert` and `update` take optional raw photo bytes. When supplied, the
/// photo is uploaded to object storage under a freshly generated key, its
/// public reference is embedded in the record, and only then is the row
/// written. On `update`, the photo being replaced is deleted first on a
/// best-effort basis (failures are logged and tolerated). `delete` resolves
/// the record's photo reference, best-effort deletes the object, then
/// deletes the row.
///
/// A photo uploaded successfully but orphaned by a subsequently failed row
/// write is a known, accepted gap: there is no rollback or compensation.
#[async_trait]
pub trait MeasurementStore: Send + Sync {
    /// Fetch all measurements.
    async fn list(&self) -> Result<Vec<Measurement>>;

    /// Fetch a single measurement by id, `None` if absent.
    async fn get(&self, id: &str) -> Result<Option<Measurement>>;

    /// Persist a new measurement, uploading the photo first if supplied.
    async fn insert(&self, measurement: &Measurement, photo: Option<&[u8]>) -> Result<()>;

    /// Update an existing measurement, matched by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingId`] when the record was never
    /// persisted.
    async fn update(&self, measurement: &Measurement, photo: Option<&[u8]>) -> Result<()>;

    /// Delete a measurement row and its associated photo object.
    ///
    /// Deleting an id that no longer exists is not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}
