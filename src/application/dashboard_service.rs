// Dashboard service - Use case for fetching energy data and building the graph
use crate::application::energy_repository::{EnergyRepository, FetchError};
use crate::domain::chart::{build_chart, Drawing};
use crate::domain::downsample::downsample;
use crate::domain::energy::{
    parse_state_value, parse_switch_state, DashboardData, EnergyHistory, EnergyMetrics,
    SamplePoint,
};
use crate::domain::geometry::TimeWindow;
use crate::infrastructure::config::AppConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn EnergyRepository>,
    config: Arc<AppConfig>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn EnergyRepository>, config: Arc<AppConfig>) -> Self {
        Self { repository, config }
    }

    /// Fetch current metrics and 24-hour history concurrently.
    pub async fn fetch_dashboard(&self, now: DateTime<Utc>) -> Result<DashboardData, FetchError> {
        let (metrics, history) =
            futures::try_join!(self.fetch_current_metrics(now), self.fetch_history(now))?;

        Ok(DashboardData { metrics, history })
    }

    pub async fn fetch_current_metrics(
        &self,
        now: DateTime<Utc>,
    ) -> Result<EnergyMetrics, FetchError> {
        let entities = &self.config.entities;
        let repo = &self.repository;

        let (pv, battery, grid, house, car_power, car_switch) = futures::try_join!(
            repo.fetch_state(&entities.pv_power),
            repo.fetch_state(&entities.battery_soc),
            repo.fetch_state(&entities.grid_power),
            repo.fetch_state(&entities.house_consumption),
            repo.fetch_state(&entities.car_charger_power),
            repo.fetch_state(&entities.car_charger_switch),
        )?;

        Ok(EnergyMetrics {
            pv_power: parse_state_value(&pv.state),
            battery_soc: parse_state_value(&battery.state),
            grid_power: parse_state_value(&grid.state),
            house_consumption: parse_state_value(&house.state),
            car_charger_power: parse_state_value(&car_power.state),
            car_charger_switch: parse_switch_state(&car_switch.state),
            timestamp: now,
        })
    }

    /// Fetch raw history for the plotted series and downsample each one.
    pub async fn fetch_history(&self, now: DateTime<Utc>) -> Result<EnergyHistory, FetchError> {
        let entities = &self.config.entities;
        let window = TimeWindow::ending_at(now);
        let entity_ids = vec![
            entities.pv_power.clone(),
            entities.grid_power.clone(),
            entities.house_consumption.clone(),
            entities.car_charger_power.clone(),
        ];

        let raw = self.repository.fetch_history(&entity_ids, window.start).await?;

        let max_points = self.config.history_max_points;
        let series = |entity_id: &str| -> Vec<SamplePoint> {
            raw.get(entity_id)
                .map(|readings| downsample(readings, max_points))
                .unwrap_or_default()
        };

        let history = EnergyHistory {
            solar: series(&entities.pv_power),
            house: series(&entities.house_consumption),
            grid: series(&entities.grid_power),
            car_charger: series(&entities.car_charger_power),
        };

        tracing::debug!(
            "History points: solar={} house={} grid={} car={}",
            history.solar.len(),
            history.house.len(),
            history.grid.len(),
            history.car_charger.len()
        );

        Ok(history)
    }

    /// Build the power graph for the 24 hours ending at `now`.
    pub fn render_chart(&self, history: &EnergyHistory, now: DateTime<Utc>) -> Drawing {
        let display = &self.config.display;
        build_chart(
            history,
            &TimeWindow::ending_at(now),
            &display.graph_rect(),
            display.mode,
            &self.config.timezone,
        )
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
