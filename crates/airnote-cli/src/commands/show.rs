//! Show command implementation.

use std::sync::Arc;

use anyhow::{Result, bail};

use airnote_client::MeasurementStore;

use crate::format;

pub async fn cmd_show(store: Arc<dyn MeasurementStore>, id: &str) -> Result<()> {
    match store.get(id).await? {
        Some(measurement) => {
            format::print_measurement(&measurement);
            Ok(())
        }
        None => bail!("Measurement not found: {id}"),
    }
}
