//! Sensor-value extraction from OCR text.
//!
//! Air-quality monitors print their readings as labelled values; a photo of
//! the display run through OCR yields a block of text like
//! `"CO2: 812.5 TEMP-23.0"`. Each known label has a fixed pattern that is
//! matched independently: a label absent from the text is simply absent
//! from the result, never an error, and there is no ordering dependency
//! between patterns.

use std::collections::HashMap;

use regex::Regex;

/// A sensor field recognisable on a monitor display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorField {
    /// CO2 concentration (ppm).
    Co2,
    /// Formaldehyde concentration (mg/m³).
    Hcho,
    /// Total volatile organic compounds (mg/m³).
    Tvoc,
    /// Temperature (°C).
    Temp,
    /// Relative humidity (%).
    Humi,
}

impl SensorField {
    /// All recognisable fields.
    pub const ALL: [SensorField; 5] = [
        SensorField::Co2,
        SensorField::Hcho,
        SensorField::Tvoc,
        SensorField::Temp,
        SensorField::Humi,
    ];

    /// The label as printed on monitor displays.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SensorField::Co2 => "CO2",
            SensorField::Hcho => "HCHO",
            SensorField::Tvoc => "TVOC",
            SensorField::Temp => "TEMP",
            SensorField::Humi => "HUMI",
        }
    }
}

impl std::fmt::Display for SensorField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Compile the per-label patterns.
///
/// Each pattern matches the label (case-insensitive), an optional `:` or
/// `-` separator, and a decimal number.
///
/// # Panics
///
/// Panics if a generated pattern is invalid, which would be a programming
/// error in this module.
fn sensor_patterns() -> Vec<(SensorField, Regex)> {
    SensorField::ALL
        .iter()
        .map(|&field| {
            let pattern = format!(r"(?i){}\s*[:\-]?\s*(\d+\.?\d*)", field.label());
            let regex = Regex::new(&pattern).expect("invalid sensor pattern");
            (field, regex)
        })
        .collect()
}

/// Extract sensor values from a block of recognised text.
///
/// # Examples
///
/// ```
/// use airnote_app::ocr::{SensorField, parse_sensor_values};
///
/// let values = parse_sensor_values("CO2: 812.5 TEMP-23.0");
/// assert_eq!(values.get(&SensorField::Co2), Some(&812.5));
/// assert_eq!(values.get(&SensorField::Temp), Some(&23.0));
/// assert_eq!(values.get(&SensorField::Hcho), None);
/// ```
#[must_use]
pub fn parse_sensor_values(text: &str) -> HashMap<SensorField, f64> {
    let mut values = HashMap::new();

    for (field, regex) in sensor_patterns() {
        if let Some(captures) = regex.captures(text) {
            let parsed = captures.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
            if let Some(value) = parsed {
                values.insert(field, value);
            }
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_labelled_values() {
        let values = parse_sensor_values("CO2: 812.5 TEMP-23.0");

        assert_eq!(values.get(&SensorField::Co2), Some(&812.5));
        assert_eq!(values.get(&SensorField::Temp), Some(&23.0));
        assert_eq!(values.get(&SensorField::Hcho), None);
        assert_eq!(values.get(&SensorField::Tvoc), None);
        assert_eq!(values.get(&SensorField::Humi), None);
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let values = parse_sensor_values("co2 - 417");
        assert_eq!(values.get(&SensorField::Co2), Some(&417.0));
    }

    #[test]
    fn test_separator_is_optional() {
        let values = parse_sensor_values("HUMI 55.5\nTVOC:0.42");
        assert_eq!(values.get(&SensorField::Humi), Some(&55.5));
        assert_eq!(values.get(&SensorField::Tvoc), Some(&0.42));
    }

    #[test]
    fn test_unlabelled_text_yields_empty_map() {
        assert!(parse_sensor_values("battery low 14%").is_empty());
        assert!(parse_sensor_values("").is_empty());
    }

    #[test]
    fn test_full_display_dump() {
        let text = "AirMon 3000\nCO2:640 HCHO:0.03\nTVOC-0.18 TEMP:21.5 HUMI:48";
        let values = parse_sensor_values(text);

        assert_eq!(values.len(), 5);
        assert_eq!(values.get(&SensorField::Co2), Some(&640.0));
        assert_eq!(values.get(&SensorField::Hcho), Some(&0.03));
        assert_eq!(values.get(&SensorField::Tvoc), Some(&0.18));
        assert_eq!(values.get(&SensorField::Temp), Some(&21.5));
        assert_eq!(values.get(&SensorField::Humi), Some(&48.0));
    }
}
