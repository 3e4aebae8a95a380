//! The measurement record and its geographic point.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, PrimitiveDateTime};

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// One recorded air-quality sample at a place and time.
///
/// Field names double as the column names of the backing table row. Sensor
/// readings are each optional; when present they are finite (the lenient
/// parsers in [`crate::parse`] never produce NaN or infinities). No range
/// validation is applied to readings.
///
/// # Example
///
/// ```
/// use airnote_types::{GeoPoint, Measurement};
///
/// let mut m = Measurement::new("Meeting room 2");
/// assert!(!m.is_persistable()); // no point yet
///
/// m.set_point(GeoPoint::new(-23.5505, -46.6333));
/// m.co2_ppm = Some(812.5);
/// assert!(m.is_persistable());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Row identifier, absent until first persisted (server-assigned).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub id: Option<String>,

    /// Name of the place where the sample was taken. Required for save.
    pub location_name: String,

    /// Latitude of the sample point. Required (together with longitude) for save.
    #[cfg_attr(feature = "serde", serde(default))]
    pub latitude: Option<f64>,

    /// Longitude of the sample point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub longitude: Option<f64>,

    /// When the sample was taken, client-assigned from the form's date and
    /// time fields. Stored without a timezone.
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "timestamp_repr", skip_serializing_if = "Option::is_none")
    )]
    pub measured_at: Option<PrimitiveDateTime>,

    /// CO2 concentration in ppm.
    #[cfg_attr(feature = "serde", serde(default))]
    pub co2_ppm: Option<f64>,

    /// Formaldehyde concentration in mg/m³.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hcho_mg_m3: Option<f64>,

    /// Total volatile organic compounds in mg/m³.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tvoc_mg_m3: Option<f64>,

    /// Temperature in degrees Celsius.
    #[cfg_attr(feature = "serde", serde(default))]
    pub temperature_c: Option<f64>,

    /// Relative humidity percentage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub humidity_percent: Option<f64>,

    /// Free-text description. Blank input is normalised to absent.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,

    /// Public URL of the associated photo object, if any. At most one photo
    /// is associated with a record.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub photo_url: Option<String>,

    /// Row creation timestamp, server-assigned on insert. Never sent by the
    /// client.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            with = "time::serde::rfc3339::option",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub created_at: Option<OffsetDateTime>,
}

impl Measurement {
    /// Create an empty record for the given location name.
    #[must_use]
    pub fn new(location_name: impl Into<String>) -> Self {
        Self {
            id: None,
            location_name: location_name.into(),
            latitude: None,
            longitude: None,
            measured_at: None,
            co2_ppm: None,
            hcho_mg_m3: None,
            tvoc_mg_m3: None,
            temperature_c: None,
            humidity_percent: None,
            description: None,
            photo_url: None,
            created_at: None,
        }
    }

    /// The geographic point, present only when both coordinates are set.
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Set both coordinates from a point.
    pub fn set_point(&mut self, point: GeoPoint) {
        self.latitude = Some(point.latitude);
        self.longitude = Some(point.longitude);
    }

    /// A record is persistable only if the location name is non-blank and a
    /// geographic point is present.
    #[must_use]
    pub fn is_persistable(&self) -> bool {
        !self.location_name.trim().is_empty() && self.point().is_some()
    }

    /// Whether a photo object is associated with this record.
    #[must_use]
    pub fn has_photo(&self) -> bool {
        self.photo_url.is_some()
    }
}

/// Serde representation for the timezone-less `measured_at` column
/// (`YYYY-MM-DDTHH:MM:SS`, the shape the backend stores and returns).
#[cfg(feature = "serde")]
mod timestamp_repr {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;

    const FORMAT: &[BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

    pub fn serialize<S>(
        value: &Option<PrimitiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => {
                let text = timestamp.format(&FORMAT).map_err(serde::ser::Error::custom)?;
                serializer.serialize_some(&text)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PrimitiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text: Option<String> = Option::deserialize(deserializer)?;
        text.map(|text| PrimitiveDateTime::parse(&text, &FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_requires_both_coordinates() {
        let mut m = Measurement::new("Office");
        assert_eq!(m.point(), None);

        m.latitude = Some(-23.5505);
        assert_eq!(m.point(), None);

        m.longitude = Some(-46.6333);
        assert_eq!(m.point(), Some(GeoPoint::new(-23.5505, -46.6333)));
    }

    #[test]
    fn test_is_persistable() {
        let mut m = Measurement::new("");
        m.set_point(GeoPoint::new(1.0, 2.0));
        assert!(!m.is_persistable(), "blank name is not persistable");

        m.location_name = "   ".to_string();
        assert!(!m.is_persistable(), "whitespace-only name is not persistable");

        m.location_name = "Central Park".to_string();
        assert!(m.is_persistable());

        m.latitude = None;
        assert!(!m.is_persistable(), "missing coordinate is not persistable");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialization_omits_absent_id_and_created_at() {
        let m = Measurement::new("Office");
        let json = serde_json::to_value(&m).unwrap();

        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_none());
        assert!(json.get("photo_url").is_none());
        // Sensor readings serialize as explicit nulls so updates clear them.
        assert!(json.get("co2_ppm").is_some());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserializes_backend_row() {
        let json = r#"{
            "id": "0b4e7a2e-5f4c-4c9e-9f3e-2c7e6a1d8b90",
            "location_name": "Central Park",
            "latitude": -23.5505,
            "longitude": -46.6333,
            "measured_at": "2025-08-05T14:30:00",
            "co2_ppm": 812.5,
            "created_at": "2025-08-05T17:31:02Z"
        }"#;

        let m: Measurement = serde_json::from_str(json).unwrap();
        assert_eq!(m.location_name, "Central Park");
        assert_eq!(m.co2_ppm, Some(812.5));
        assert_eq!(m.hcho_mg_m3, None);
        let measured_at = m.measured_at.unwrap();
        assert_eq!(measured_at.hour(), 14);
        assert_eq!(measured_at.minute(), 30);
        assert!(m.created_at.is_some());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_measured_at_round_trips() {
        let mut m = Measurement::new("Office");
        m.measured_at = Some(PrimitiveDateTime::new(
            time::Date::from_calendar_date(2025, time::Month::August, 5).unwrap(),
            time::Time::from_hms(14, 30, 0).unwrap(),
        ));

        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["measured_at"], "2025-08-05T14:30:00");

        let back: Measurement = serde_json::from_value(json).unwrap();
        assert_eq!(back.measured_at, m.measured_at);
    }
}
