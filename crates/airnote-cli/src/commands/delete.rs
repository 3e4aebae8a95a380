//! Delete command implementation.

use std::sync::Arc;

use anyhow::Result;

use airnote_client::MeasurementStore;

pub async fn cmd_delete(store: Arc<dyn MeasurementStore>, id: &str, quiet: bool) -> Result<()> {
    store.delete(id).await?;
    if !quiet {
        println!("Deleted measurement {id}");
    }
    Ok(())
}
