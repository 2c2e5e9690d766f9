// Dashboard service - The action chains behind every timer and user control
//
// Each action talks to the remote service first and only touches the view
// state after a successful fetch, so a failed call leaves the view unchanged.
// Writes are always followed by a fresh fetch; the remote store stays the
// source of truth.
use crate::application::chart_controller::ChartSetController;
use crate::application::reading_generator::SyntheticReadingGenerator;
use crate::application::sensor_client::{RemoteResult, RemoteSensorClient};
use crate::application::view_state::ViewState;
use crate::domain::reading::{ReadingSeries, SensorReading};
use crate::domain::theme::DisplayTheme;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Copy of the view state for read endpoints
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub theme: DisplayTheme,
    pub readings: ReadingSeries,
    pub chart_count: usize,
}

#[derive(Clone)]
pub struct DashboardService {
    client: Arc<dyn RemoteSensorClient>,
    generator: SyntheticReadingGenerator,
    sensor_id: i64,
    view: Arc<Mutex<ViewState<ChartSetController>>>,
}

impl DashboardService {
    pub fn new(
        client: Arc<dyn RemoteSensorClient>,
        sensor_id: i64,
        view: ViewState<ChartSetController>,
    ) -> Self {
        Self {
            client,
            generator: SyntheticReadingGenerator,
            sensor_id,
            view: Arc::new(Mutex::new(view)),
        }
    }

    /// Fetch the full series and install it. Returns the number of readings.
    pub async fn refresh(&self) -> RemoteResult<usize> {
        let series = self.client.fetch_all().await?;
        let count = series.len();
        self.view.lock().await.replace_series(series);
        tracing::debug!(count, "View state refreshed");
        Ok(count)
    }

    /// Generate one synthetic reading, upload it, then refresh.
    pub async fn send_now(&self) -> RemoteResult<SensorReading> {
        let reading = self.generator.generate(self.sensor_id);
        self.client.append(&reading).await?;
        tracing::info!(sensor_id = reading.sensor_id, "Synthetic reading sent");
        self.refresh().await?;
        Ok(reading)
    }

    /// Delete every stored reading, then refresh.
    pub async fn delete_all(&self) -> RemoteResult<()> {
        self.client.clear_all().await?;
        tracing::info!("Stored readings deleted");
        self.refresh().await?;
        Ok(())
    }

    pub async fn toggle_theme(&self) -> DisplayTheme {
        let mut view = self.view.lock().await;
        let theme = view.theme().toggled();
        view.set_theme(theme);
        theme
    }

    pub async fn set_theme(&self, theme: DisplayTheme) {
        self.view.lock().await.set_theme(theme);
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        let view = self.view.lock().await;
        ViewSnapshot {
            theme: view.theme(),
            readings: view.series().clone(),
            chart_count: view.subscriber().chart_count(),
        }
    }
}
