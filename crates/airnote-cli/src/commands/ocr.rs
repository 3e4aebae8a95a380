//! OCR command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use airnote_app::{SensorField, parse_sensor_values};

pub fn cmd_ocr(file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read OCR text file: {}", file.display()))?;

    let values = parse_sensor_values(&text);
    if values.is_empty() {
        println!("No sensor values recognised.");
        return Ok(());
    }

    for field in SensorField::ALL {
        if let Some(value) = values.get(&field) {
            println!("{field}: {value}");
        }
    }
    Ok(())
}
