//! Add command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;
use time::OffsetDateTime;

use airnote_app::{FormController, parse_sensor_values, photo};
use airnote_client::MeasurementStore;
use airnote_types::parse;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Location name
    #[arg(long)]
    pub name: String,

    /// Latitude in decimal degrees
    #[arg(long)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long)]
    pub lon: f64,

    /// Measurement date as DD/MM/YYYY (defaults to today, UTC)
    #[arg(long)]
    pub date: Option<String>,

    /// Measurement time as HH:MM (defaults to now, UTC)
    #[arg(long)]
    pub time: Option<String>,

    /// CO2 in ppm
    #[arg(long)]
    pub co2: Option<String>,

    /// Formaldehyde in mg/m3
    #[arg(long)]
    pub hcho: Option<String>,

    /// TVOC in mg/m3
    #[arg(long)]
    pub tvoc: Option<String>,

    /// Temperature in degrees Celsius
    #[arg(long)]
    pub temperature: Option<String>,

    /// Relative humidity in percent
    #[arg(long)]
    pub humidity: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Photo file to upload with the measurement
    #[arg(long)]
    pub photo: Option<PathBuf>,

    /// Pre-fill sensor fields from an OCR text file
    #[arg(long)]
    pub ocr_file: Option<PathBuf>,
}

pub async fn cmd_add(store: Arc<dyn MeasurementStore>, args: AddArgs, quiet: bool) -> Result<()> {
    let mut controller = FormController::new(store);

    // OCR pre-fill first; explicit flags override it below.
    if let Some(path) = &args.ocr_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read OCR text file: {}", path.display()))?;
        controller.apply_ocr(&parse_sensor_values(&text));
    }

    controller.set_location_name(args.name.as_str());
    controller.set_point(args.lat, args.lon);

    if let Some(co2) = &args.co2 {
        controller.set_co2(co2.as_str());
    }
    if let Some(hcho) = &args.hcho {
        controller.set_hcho(hcho.as_str());
    }
    if let Some(tvoc) = &args.tvoc {
        controller.set_tvoc(tvoc.as_str());
    }
    if let Some(temperature) = &args.temperature {
        controller.set_temperature(temperature.as_str());
    }
    if let Some(humidity) = &args.humidity {
        controller.set_humidity(humidity.as_str());
    }
    if let Some(description) = &args.description {
        controller.set_description(description.as_str());
    }

    let now = OffsetDateTime::now_utc();
    let date_text = args
        .date
        .clone()
        .unwrap_or_else(|| parse::format_date(now.date()));
    let time_text = args
        .time
        .clone()
        .unwrap_or_else(|| parse::format_time(now.time()));
    controller.set_date_text(date_text);
    controller.set_time_text(time_text);

    if controller.state().date_invalid {
        bail!(
            "Invalid date {:?}, expected DD/MM/YYYY",
            controller.state().date_text
        );
    }
    if controller.state().time_invalid {
        bail!(
            "Invalid time {:?}, expected HH:MM",
            controller.state().time_text
        );
    }

    if let Some(path) = &args.photo {
        let bytes = photo::read_image_bytes(path)
            .with_context(|| format!("Failed to read photo: {}", path.display()))?;
        controller.capture_photo(bytes);
    }

    if !controller.state().is_form_valid() {
        bail!("Location name must not be blank");
    }

    controller.save().await;

    if let Some(error) = &controller.state().save_error {
        bail!("Save failed: {error}");
    }
    if !quiet {
        println!("Recorded measurement at {}", args.name);
    }
    Ok(())
}
