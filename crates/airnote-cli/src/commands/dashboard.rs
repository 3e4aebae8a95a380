//! Dashboard command implementation.

use std::sync::Arc;

use anyhow::Result;

use airnote_app::DashboardController;
use airnote_client::MeasurementStore;

use crate::format;

pub async fn cmd_dashboard(store: Arc<dyn MeasurementStore>) -> Result<()> {
    let mut controller = DashboardController::new(store);
    controller.refresh().await;
    format::print_dashboard(controller.state());
    Ok(())
}
