//! View-state controller for the dashboard.
//!
//! Aggregates every recorded measurement into summary statistics, a
//! categorical insight over the mean CO2, and a time-ordered trend series
//! for the chart.

use std::sync::Arc;

use airnote_client::MeasurementStore;
use airnote_types::{Co2Band, Measurement};

/// One point of the CO2 trend chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    /// Position in creation order.
    pub index: usize,
    /// CO2 concentration in ppm.
    pub co2_ppm: f64,
}

/// Snapshot of the dashboard screen.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// A refresh is in flight.
    pub loading: bool,
    /// Total number of recorded measurements.
    pub total: usize,
    /// Mean CO2 over measurements that have a CO2 reading, 0.0 when none do.
    pub mean_co2: f64,
    /// Highest TVOC reading seen, 0.0 when none is present.
    pub max_tvoc: f64,
    /// Quality band of the mean CO2, absent until data was loaded.
    pub band: Option<Co2Band>,
    /// Human-readable insight text.
    pub insight: String,
    /// CO2 readings in creation order; records without CO2 are skipped.
    pub trend: Vec<TrendPoint>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            loading: false,
            total: 0,
            mean_co2: 0.0,
            max_tvoc: 0.0,
            band: None,
            insight: "Analyzing data...".to_string(),
            trend: Vec::new(),
        }
    }
}

/// Controller for the dashboard screen.
pub struct DashboardController {
    store: Arc<dyn MeasurementStore>,
    state: DashboardState,
}

impl DashboardController {
    /// Create a controller with no data loaded yet.
    pub fn new(store: Arc<dyn MeasurementStore>) -> Self {
        Self {
            store,
            state: DashboardState::default(),
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    fn replace(&mut self, next: DashboardState) {
        self.state = next;
    }

    /// Re-fetch all measurements and recompute the summary.
    pub async fn refresh(&mut self) {
        self.replace(DashboardState {
            loading: true,
            ..self.state.clone()
        });

        match self.store.list().await {
            Ok(records) => self.replace(Self::summarize(&records)),
            Err(error) => {
                tracing::warn!(%error, "dashboard refresh failed");
                self.replace(DashboardState {
                    loading: false,
                    insight: "Failed to load data.".to_string(),
                    ..self.state.clone()
                });
            }
        }
    }

    fn summarize(records: &[Measurement]) -> DashboardState {
        if records.is_empty() {
            return DashboardState {
                insight: "No measurements recorded yet.".to_string(),
                ..DashboardState::default()
            };
        }

        let co2_values: Vec<f64> = records.iter().filter_map(|m| m.co2_ppm).collect();
        let mean_co2 = if co2_values.is_empty() {
            0.0
        } else {
            co2_values.iter().sum::<f64>() / co2_values.len() as f64
        };

        let max_tvoc = records
            .iter()
            .filter_map(|m| m.tvoc_mg_m3)
            .fold(0.0, f64::max);

        let mut ordered: Vec<&Measurement> = records.iter().collect();
        ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let trend: Vec<TrendPoint> = ordered
            .iter()
            .filter_map(|m| m.co2_ppm)
            .enumerate()
            .map(|(index, co2_ppm)| TrendPoint { index, co2_ppm })
            .collect();

        let band = Co2Band::from_mean_ppm(mean_co2);

        DashboardState {
            loading: false,
            total: records.len(),
            mean_co2,
            max_tvoc,
            band: Some(band),
            insight: band.advice().to_string(),
            trend,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use airnote_client::MockStore;
    use airnote_types::GeoPoint;

    use super::*;

    fn record(name: &str, co2: Option<f64>, tvoc: Option<f64>, age_minutes: i64) -> Measurement {
        let mut m = Measurement::new(name);
        m.set_point(GeoPoint::new(0.0, 0.0));
        m.co2_ppm = co2;
        m.tvoc_mg_m3 = tvoc;
        m.created_at = Some(OffsetDateTime::now_utc() - Duration::minutes(age_minutes));
        m
    }

    async fn refreshed(records: Vec<Measurement>) -> DashboardController {
        let store = Arc::new(MockStore::new());
        store.seed(records).await;
        let mut controller = DashboardController::new(store);
        controller.refresh().await;
        controller
    }

    #[tokio::test]
    async fn test_mean_co2_ignores_absent_values() {
        let controller = refreshed(vec![
            record("A", Some(500.0), None, 30),
            record("B", Some(700.0), None, 20),
            record("C", Some(1200.0), None, 10),
            record("D", None, None, 5),
        ])
        .await;

        let state = controller.state();
        assert_eq!(state.total, 4);
        assert!((state.mean_co2 - 800.0).abs() < f64::EPSILON);
        assert_eq!(state.band, Some(Co2Band::Acceptable));
        assert_eq!(state.insight, Co2Band::Acceptable.advice());
    }

    #[tokio::test]
    async fn test_severe_band_for_high_mean() {
        let controller = refreshed(vec![record("A", Some(1600.0), None, 1)]).await;
        assert_eq!(controller.state().band, Some(Co2Band::Severe));
        assert!(controller.state().insight.contains("Warning"));
    }

    #[tokio::test]
    async fn test_trend_is_creation_ordered_and_skips_absent_co2() {
        let controller = refreshed(vec![
            record("Newest", Some(900.0), None, 1),
            record("Oldest", Some(500.0), None, 60),
            record("NoCo2", None, None, 30),
            record("Middle", Some(700.0), None, 15),
        ])
        .await;

        let trend = &controller.state().trend;
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0], TrendPoint { index: 0, co2_ppm: 500.0 });
        assert_eq!(trend[1], TrendPoint { index: 1, co2_ppm: 700.0 });
        assert_eq!(trend[2], TrendPoint { index: 2, co2_ppm: 900.0 });
    }

    #[tokio::test]
    async fn test_max_tvoc() {
        let controller = refreshed(vec![
            record("A", None, Some(0.4), 3),
            record("B", None, Some(1.2), 2),
            record("C", None, Some(0.9), 1),
        ])
        .await;

        assert!((controller.state().max_tvoc - 1.2).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_empty_store_reports_empty_state() {
        let controller = refreshed(Vec::new()).await;

        let state = controller.state();
        assert_eq!(state.total, 0);
        assert_eq!(state.mean_co2, 0.0);
        assert_eq!(state.band, None);
        assert_eq!(state.insight, "No measurements recorded yet.");
        assert!(state.trend.is_empty());
    }

    #[tokio::test]
    async fn test_all_co2_absent_reports_zero_mean() {
        let controller = refreshed(vec![record("A", None, None, 1)]).await;

        assert_eq!(controller.state().mean_co2, 0.0);
        assert!(controller.state().trend.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_failure_sets_insight() {
        let store = Arc::new(MockStore::new());
        store.set_fail(true);
        let mut controller = DashboardController::new(store);
        controller.refresh().await;

        assert!(!controller.state().loading);
        assert_eq!(controller.state().insight, "Failed to load data.");
    }
}
