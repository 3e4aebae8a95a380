//! View-state controller for the measurement form.
//!
//! The form holds everything the user is editing as plain strings, plus the
//! selected geographic point and any staged photo. State lives in an
//! immutable [`FormState`] snapshot that is replaced wholesale on each
//! transition; the controller owns the current snapshot and the async
//! operations that produce the next one.

use std::collections::HashMap;
use std::sync::Arc;

use time::{Date, PrimitiveDateTime, Time};

use airnote_client::MeasurementStore;
use airnote_types::{GeoPoint, Measurement, parse};

use crate::location::LocationProvider;
use crate::ocr::SensorField;

/// Snapshot of the form screen.
///
/// Numeric fields are free-form strings; malformed numeric text silently
/// becomes an absent reading at save time. Date and time text are validated
/// eagerly against the fixed display patterns and flagged invalid when
/// unparsable, which disables save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    /// An existing record is being fetched.
    pub loading: bool,
    /// A save is in flight.
    pub saving: bool,
    /// The last save completed successfully.
    pub save_success: bool,
    /// User-visible message from a failed load or save.
    pub save_error: Option<String>,
    /// A one-shot location request is in flight.
    pub fetching_location: bool,
    /// User-visible message from a failed location request.
    pub location_error: Option<String>,

    /// Identifier of the record being edited, absent when creating.
    pub id: Option<String>,
    /// Location name text. Required.
    pub location_name: String,
    /// Free-text description.
    pub description: String,
    /// CO2 text field (ppm).
    pub co2: String,
    /// TVOC text field (mg/m³).
    pub tvoc: String,
    /// Formaldehyde text field (mg/m³).
    pub hcho: String,
    /// Temperature text field (°C).
    pub temperature: String,
    /// Humidity text field (%).
    pub humidity: String,

    /// Date text in the `DD/MM/YYYY` display pattern.
    pub date_text: String,
    /// Time text in the `HH:MM` display pattern.
    pub time_text: String,
    /// Non-empty date text failed to parse.
    pub date_invalid: bool,
    /// Non-empty time text failed to parse.
    pub time_invalid: bool,
    /// Parsed date, present only while the text is valid.
    pub date: Option<Date>,
    /// Parsed time, present only while the text is valid.
    pub time: Option<Time>,

    /// Selected geographic point.
    pub point: Option<GeoPoint>,
    /// Freshly captured photo bytes awaiting upload.
    pub photo_bytes: Option<Vec<u8>>,
    /// Remote photo reference of the record being edited.
    pub photo_url: Option<String>,
}

impl FormState {
    /// The save action is enabled only for a complete, parseable form:
    /// non-blank location name, a geographic point, and a valid date and
    /// time.
    #[must_use]
    pub fn is_form_valid(&self) -> bool {
        !self.location_name.trim().is_empty()
            && self.point.is_some()
            && self.date.is_some()
            && self.time.is_some()
    }

    /// Title of the screen, depending on create vs. edit.
    #[must_use]
    pub fn screen_title(&self) -> &'static str {
        if self.id.is_none() {
            "New measurement"
        } else {
            "Edit measurement"
        }
    }
}

/// Controller for the measurement form screen.
pub struct FormController {
    store: Arc<dyn MeasurementStore>,
    state: FormState,
}

impl FormController {
    /// Create a controller ready for a new measurement.
    pub fn new(store: Arc<dyn MeasurementStore>) -> Self {
        Self {
            store,
            state: FormState::default(),
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    fn replace(&mut self, next: FormState) {
        self.state = next;
    }

    // ======================================================================
    // Field setters
    // ======================================================================

    /// Set the location name text.
    pub fn set_location_name(&mut self, value: impl Into<String>) {
        self.replace(FormState {
            location_name: value.into(),
            ..self.state.clone()
        });
    }

    /// Set the description text.
    pub fn set_description(&mut self, value: impl Into<String>) {
        self.replace(FormState {
            description: value.into(),
            ..self.state.clone()
        });
    }

    /// Set the CO2 text field.
    pub fn set_co2(&mut self, value: impl Into<String>) {
        self.replace(FormState {
            co2: value.into(),
            ..self.state.clone()
        });
    }

    /// Set the TVOC text field.
    pub fn set_tvoc(&mut self, value: impl Into<String>) {
        self.replace(FormState {
            tvoc: value.into(),
            ..self.state.clone()
        });
    }

    /// Set the formaldehyde text field.
    pub fn set_hcho(&mut self, value: impl Into<String>) {
        self.replace(FormState {
            hcho: value.into(),
            ..self.state.clone()
        });
    }

    /// Set the temperature text field.
    pub fn set_temperature(&mut self, value: impl Into<String>) {
        self.replace(FormState {
            temperature: value.into(),
            ..self.state.clone()
        });
    }

    /// Set the humidity text field.
    pub fn set_humidity(&mut self, value: impl Into<String>) {
        self.replace(FormState {
            humidity: value.into(),
            ..self.state.clone()
        });
    }

    /// Set the date text, validating it against the `DD/MM/YYYY` pattern.
    pub fn set_date_text(&mut self, value: impl Into<String>) {
        let date_text = value.into();
        let (date, date_invalid) = if date_text.trim().is_empty() {
            (None, false)
        } else {
            match parse::parse_date(&date_text) {
                Ok(date) => (Some(date), false),
                Err(_) => (None, true),
            }
        };
        self.replace(FormState {
            date_text,
            date,
            date_invalid,
            ..self.state.clone()
        });
    }

    /// Set the time text, validating it against the `HH:MM` pattern.
    pub fn set_time_text(&mut self, value: impl Into<String>) {
        let time_text = value.into();
        let (time, time_invalid) = if time_text.trim().is_empty() {
            (None, false)
        } else {
            match parse::parse_time(&time_text) {
                Ok(time) => (Some(time), false),
                Err(_) => (None, true),
            }
        };
        self.replace(FormState {
            time_text,
            time,
            time_invalid,
            ..self.state.clone()
        });
    }

    /// Set the geographic point, e.g. from a map selection.
    pub fn set_point(&mut self, latitude: f64, longitude: f64) {
        self.replace(FormState {
            point: Some(GeoPoint::new(latitude, longitude)),
            ..self.state.clone()
        });
    }

    /// Stage freshly captured photo bytes.
    ///
    /// Any previous remote photo reference is cleared; the store deletes
    /// the old object when the replacement is saved.
    pub fn capture_photo(&mut self, bytes: Vec<u8>) {
        self.replace(FormState {
            photo_bytes: Some(bytes),
            photo_url: None,
            ..self.state.clone()
        });
    }

    /// Copy extracted OCR values into the matching text fields.
    pub fn apply_ocr(&mut self, values: &HashMap<SensorField, f64>) {
        let mut next = self.state.clone();
        for (&field, &value) in values {
            let text = parse::format_decimal(value);
            match field {
                SensorField::Co2 => next.co2 = text,
                SensorField::Hcho => next.hcho = text,
                SensorField::Tvoc => next.tvoc = text,
                SensorField::Temp => next.temperature = text,
                SensorField::Humi => next.humidity = text,
            }
        }
        self.replace(next);
    }

    // ======================================================================
    // Async operations
    // ======================================================================

    /// Fetch an existing record and populate every field from it.
    pub async fn load_existing(&mut self, id: &str) {
        self.replace(FormState {
            loading: true,
            ..self.state.clone()
        });

        match self.store.get(id).await {
            Ok(Some(measurement)) => {
                let (date, date_text, time, time_text) = match measurement.measured_at {
                    Some(timestamp) => (
                        Some(timestamp.date()),
                        parse::format_date(timestamp.date()),
                        Some(timestamp.time()),
                        parse::format_time(timestamp.time()),
                    ),
                    None => (None, String::new(), None, String::new()),
                };

                self.replace(FormState {
                    loading: false,
                    id: measurement.id.clone(),
                    location_name: measurement.location_name.clone(),
                    description: measurement.description.clone().unwrap_or_default(),
                    co2: measurement.co2_ppm.map(parse::format_decimal).unwrap_or_default(),
                    tvoc: measurement
                        .tvoc_mg_m3
                        .map(parse::format_decimal)
                        .unwrap_or_default(),
                    hcho: measurement
                        .hcho_mg_m3
                        .map(parse::format_decimal)
                        .unwrap_or_default(),
                    temperature: measurement
                        .temperature_c
                        .map(parse::format_decimal)
                        .unwrap_or_default(),
                    humidity: measurement
                        .humidity_percent
                        .map(parse::format_decimal)
                        .unwrap_or_default(),
                    date,
                    date_text,
                    time,
                    time_text,
                    date_invalid: false,
                    time_invalid: false,
                    point: measurement.point(),
                    photo_bytes: None,
                    photo_url: measurement.photo_url.clone(),
                    ..self.state.clone()
                });
            }
            Ok(None) => {
                self.replace(FormState {
                    loading: false,
                    save_error: Some("Measurement not found.".to_string()),
                    ..self.state.clone()
                });
            }
            Err(error) => {
                self.replace(FormState {
                    loading: false,
                    save_error: Some(error.to_string()),
                    ..self.state.clone()
                });
            }
        }
    }

    /// Ask the device location provider for a one-shot coordinate.
    pub async fn acquire_location(&mut self, provider: &dyn LocationProvider) {
        self.replace(FormState {
            fetching_location: true,
            location_error: None,
            ..self.state.clone()
        });

        match provider.current_location().await {
            Ok(point) => {
                self.replace(FormState {
                    fetching_location: false,
                    point: Some(point),
                    ..self.state.clone()
                });
            }
            Err(error) => {
                self.replace(FormState {
                    fetching_location: false,
                    location_error: Some(error.to_string()),
                    ..self.state.clone()
                });
            }
        }
    }

    /// Persist the form.
    ///
    /// Does nothing unless [`FormState::is_form_valid`] holds. Assembles a
    /// [`Measurement`] from the current snapshot (malformed numeric text
    /// becomes an absent reading, a blank description becomes absent) and
    /// inserts or updates depending on whether an identifier is set. The
    /// outcome lands in `save_success` or `save_error`.
    pub async fn save(&mut self) {
        if !self.state.is_form_valid() {
            return;
        }

        self.replace(FormState {
            saving: true,
            ..self.state.clone()
        });

        let snapshot = self.state.clone();
        let measured_at = match (snapshot.date, snapshot.time) {
            (Some(date), Some(time)) => Some(PrimitiveDateTime::new(date, time)),
            _ => None,
        };

        let measurement = Measurement {
            id: snapshot.id.clone(),
            location_name: snapshot.location_name.clone(),
            latitude: snapshot.point.map(|p| p.latitude),
            longitude: snapshot.point.map(|p| p.longitude),
            measured_at,
            co2_ppm: parse::parse_decimal(&snapshot.co2),
            hcho_mg_m3: parse::parse_decimal(&snapshot.hcho),
            tvoc_mg_m3: parse::parse_decimal(&snapshot.tvoc),
            temperature_c: parse::parse_decimal(&snapshot.temperature),
            humidity_percent: parse::parse_decimal(&snapshot.humidity),
            description: parse::blank_to_none(&snapshot.description),
            photo_url: snapshot.photo_url.clone(),
            created_at: None,
        };

        let result = if measurement.id.is_none() {
            self.store
                .insert(&measurement, snapshot.photo_bytes.as_deref())
                .await
        } else {
            self.store
                .update(&measurement, snapshot.photo_bytes.as_deref())
                .await
        };

        match result {
            Ok(()) => {
                tracing::debug!(location = %measurement.location_name, "measurement saved");
                self.replace(FormState {
                    saving: false,
                    save_success: true,
                    ..self.state.clone()
                });
            }
            Err(error) => {
                self.replace(FormState {
                    saving: false,
                    save_error: Some(error.to_string()),
                    ..self.state.clone()
                });
            }
        }
    }

    /// Clear the save outcome after the UI has consumed it.
    pub fn reset_save_status(&mut self) {
        self.replace(FormState {
            save_success: false,
            save_error: None,
            ..self.state.clone()
        });
    }
}
