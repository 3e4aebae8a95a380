//! One-shot device location seam.

use async_trait::async_trait;
use thiserror::Error;

use airnote_types::GeoPoint;

/// Errors from the device location provider.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LocationError {
    /// Location permission was denied.
    #[error("Location permission denied")]
    PermissionDenied,

    /// No coordinate could be obtained.
    #[error("Could not obtain location: {0}")]
    Unavailable(String),
}

/// Trait abstracting the device location provider.
///
/// The form controller asks for a single coordinate when the user taps
/// "use my location"; there is no subscription or continuous tracking.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Obtain one coordinate.
    async fn current_location(&self) -> Result<GeoPoint, LocationError>;
}

/// A provider that always returns the same point.
///
/// Useful for tests and for CLI invocations where the coordinate is given
/// on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    point: GeoPoint,
}

impl FixedLocationProvider {
    /// Create a provider pinned to the given coordinates.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            point: GeoPoint::new(latitude, longitude),
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_location(&self) -> Result<GeoPoint, LocationError> {
        Ok(self.point)
    }
}
