//! View-state controller for the measurement list.

use std::sync::Arc;

use airnote_client::MeasurementStore;
use airnote_types::Measurement;

/// Snapshot of the list screen.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// A refresh or delete is in flight.
    pub loading: bool,
    /// The cached full result set, most recent first.
    pub records: Vec<Measurement>,
    /// The records currently displayed after filtering.
    pub visible: Vec<Measurement>,
    /// Current search text.
    pub search_text: String,
    /// User-visible message from a failed refresh or delete.
    pub error: Option<String>,
}

/// Controller for the measurement list screen.
///
/// Holds the full result set fetched from the store and derives the
/// displayed subset from it with a case-insensitive substring filter on the
/// location name. Filtering never re-fetches.
pub struct ListController {
    store: Arc<dyn MeasurementStore>,
    state: ListState,
}

impl ListController {
    /// Create a controller with an empty cache.
    pub fn new(store: Arc<dyn MeasurementStore>) -> Self {
        Self {
            store,
            state: ListState::default(),
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> &ListState {
        &self.state
    }

    fn replace(&mut self, next: ListState) {
        self.state = next;
    }

    /// Re-fetch the full result set, replacing the cache and re-applying
    /// the current filter. Records are ordered most-recent-first by
    /// creation timestamp.
    pub async fn refresh(&mut self) {
        self.replace(ListState {
            loading: true,
            ..self.state.clone()
        });

        match self.store.list().await {
            Ok(mut records) => {
                records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                let visible = Self::filter(&records, &self.state.search_text);
                self.replace(ListState {
                    loading: false,
                    records,
                    visible,
                    error: None,
                    ..self.state.clone()
                });
            }
            Err(error) => {
                self.replace(ListState {
                    loading: false,
                    error: Some(error.to_string()),
                    ..self.state.clone()
                });
            }
        }
    }

    /// Update the search text and recompute the displayed set from the
    /// cache.
    pub fn set_search_text(&mut self, query: impl Into<String>) {
        let search_text = query.into();
        let visible = Self::filter(&self.state.records, &search_text);
        self.replace(ListState {
            search_text,
            visible,
            ..self.state.clone()
        });
    }

    /// Delete a measurement, then refresh the list.
    pub async fn delete(&mut self, id: &str) {
        self.replace(ListState {
            loading: true,
            ..self.state.clone()
        });

        match self.store.delete(id).await {
            Ok(()) => self.refresh().await,
            Err(error) => {
                self.replace(ListState {
                    loading: false,
                    error: Some(format!("Failed to delete: {error}")),
                    ..self.state.clone()
                });
            }
        }
    }

    fn filter(records: &[Measurement], query: &str) -> Vec<Measurement> {
        if query.is_empty() {
            return records.to_vec();
        }
        let query = query.to_lowercase();
        records
            .iter()
            .filter(|record| record.location_name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}
