//! Edit command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;

use airnote_app::{FormController, photo};
use airnote_client::MeasurementStore;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Identifier of the measurement to edit
    pub id: String,

    /// New location name
    #[arg(long)]
    pub name: Option<String>,

    /// New latitude in decimal degrees (requires --lon)
    #[arg(long, requires = "lon")]
    pub lat: Option<f64>,

    /// New longitude in decimal degrees (requires --lat)
    #[arg(long, requires = "lat")]
    pub lon: Option<f64>,

    /// New measurement date as DD/MM/YYYY
    #[arg(long)]
    pub date: Option<String>,

    /// New measurement time as HH:MM
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

    /// Replacement photo; the previous object is deleted
    #[arg(long)]
    pub photo: Option<PathBuf>,
}

pub async fn cmd_edit(store: Arc<dyn MeasurementStore>, args: EditArgs, quiet: bool) -> Result<()> {
    let mut controller = FormController::new(store);
    controller.load_existing(&args.id).await;

    if let Some(error) = &controller.state().save_error {
        bail!("{error}");
    }

    if let Some(name) = &args.name {
        controller.set_location_name(name.as_str());
    }
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        controller.set_point(lat, lon);
    }
    if let Some(date) = &args.date {
        controller.set_date_text(date.as_str());
        if controller.state().date_invalid {
            bail!("Invalid date {date:?}, expected DD/MM/YYYY");
        }
    }
    if let Some(time) = &args.time {
        controller.set_time_text(time.as_str());
        if controller.state().time_invalid {
            bail!("Invalid time {time:?}, expected HH:MM");
        }
    }
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
    if let Some(path) = &args.photo {
        let bytes = photo::read_image_bytes(path)
            .with_context(|| format!("Failed to read photo: {}", path.display()))?;
        controller.capture_photo(bytes);
    }

    if !controller.state().is_form_valid() {
        bail!("The edited measurement is incomplete; check name, point, date, and time");
    }

    controller.save().await;

    if let Some(error) = &controller.state().save_error {
        bail!("Save failed: {error}");
    }
    if !quiet {
        println!("Updated measurement {}", args.id);
    }
    Ok(())
}
