//! Remote access layer for airnote measurements.
//!
//! This crate is the client boundary to the measurement backend: rows in a
//! PostgREST-style table plus photo objects in storage. It provides:
//!
//! - [`MeasurementStore`] - the trait controllers program against
//! - [`RestStore`] - the REST implementation
//! - [`MockStore`] - an in-memory implementation for tests
//!
//! All operations resolve to a [`Result`] wrapping the value or the
//! triggering error; there are no retries and no partial-failure rollback.

pub mod error;
pub mod mock;
pub mod rest;
pub mod store;

pub use error::{Error, Result};
pub use mock::MockStore;
pub use rest::{DEFAULT_PHOTO_BUCKET, RestStore};
pub use store::MeasurementStore;
