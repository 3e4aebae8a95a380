//! List command implementation.

use std::sync::Arc;

use anyhow::{Result, bail};

use airnote_app::ListController;
use airnote_client::MeasurementStore;

use crate::format;

pub async fn cmd_list(
    store: Arc<dyn MeasurementStore>,
    search: Option<String>,
    output_format: &str,
) -> Result<()> {
    let mut controller = ListController::new(store);
    controller.refresh().await;

    if let Some(error) = &controller.state().error {
        bail!("{error}");
    }

    if let Some(search) = search {
        controller.set_search_text(search);
    }

    match output_format {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&controller.state().visible)?
        ),
        _ => format::print_measurements(&controller.state().visible),
    }

    Ok(())
}
