//! Output formatting for measurements and the dashboard.

use airnote_app::DashboardState;
use airnote_types::{Measurement, parse};

/// Render an optional reading with its unit.
fn reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{value} {unit}"),
        None => "-".to_string(),
    }
}

/// Render the measurement timestamp for list display.
fn timestamp(measurement: &Measurement) -> String {
    measurement
        .measured_at
        .map(parse::format_timestamp)
        .unwrap_or_else(|| "date unavailable".to_string())
}

/// Print one measurement per line.
pub fn print_measurements(measurements: &[Measurement]) {
    if measurements.is_empty() {
        println!("No measurements.");
        return;
    }

    for measurement in measurements {
        println!(
            "{:<36}  {:<24}  {:>10}  {}",
            measurement.id.as_deref().unwrap_or("-"),
            measurement.location_name,
            reading(measurement.co2_ppm, "ppm"),
            timestamp(measurement),
        );
    }
}

/// Print the full detail of one measurement.
pub fn print_measurement(measurement: &Measurement) {
    println!("Location:    {}", measurement.location_name);
    if let Some(point) = measurement.point() {
        println!("Point:       {point}");
    }
    println!("Measured at: {}", timestamp(measurement));
    println!("CO2:         {}", reading(measurement.co2_ppm, "ppm"));
    println!("HCHO:        {}", reading(measurement.hcho_mg_m3, "mg/m3"));
    println!("TVOC:        {}", reading(measurement.tvoc_mg_m3, "mg/m3"));
    println!("Temperature: {}", reading(measurement.temperature_c, "C"));
    println!("Humidity:    {}", reading(measurement.humidity_percent, "%"));
    if let Some(description) = &measurement.description {
        println!("Description: {description}");
    }
    if let Some(photo_url) = &measurement.photo_url {
        println!("Photo:       {photo_url}");
    }
    if let Some(id) = &measurement.id {
        println!("Id:          {id}");
    }
}

/// Print the dashboard summary and trend.
pub fn print_dashboard(state: &DashboardState) {
    println!("Measurements: {}", state.total);
    println!("Mean CO2:     {:.1} ppm", state.mean_co2);
    println!("Max TVOC:     {:.2} mg/m3", state.max_tvoc);
    if let Some(band) = state.band {
        println!("Band:         {band}");
    }
    println!("{}", state.insight);

    if !state.trend.is_empty() {
        println!();
        println!("CO2 trend (oldest first):");
        for point in &state.trend {
            println!("  #{:<3} {:>8.1} ppm", point.index, point.co2_ppm);
        }
    }
}
