// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::chart_controller::ChartSetController;
use crate::application::dashboard_service::DashboardService;
use crate::application::polling_scheduler::PollingScheduler;
use crate::application::view_state::ViewState;
use crate::infrastructure::chart_board::ChartBoard;
use crate::infrastructure::config::load_settings;
use crate::infrastructure::http_sensor_client::HttpSensorClient;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sensor_dashboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = load_settings()?;
    let timezone = settings.timezone()?;
    let addr = settings.bind_addr()?;
    tracing::info!(
        remote = %settings.remote.base_url,
        fetch_interval_secs = settings.polling.fetch_interval_secs,
        send_interval_secs = settings.polling.send_interval_secs,
        theme = ?settings.display.theme,
        %timezone,
        "Configuration loaded"
    );

    // Remote ingestion service (infrastructure layer)
    let client = Arc::new(HttpSensorClient::new(
        &settings.remote.base_url,
        settings.remote_timeout(),
    )?);

    // View state and chart set (application layer)
    let chart_board = ChartBoard::new();
    let charts = ChartSetController::new(
        Box::new(chart_board.renderer(&settings.display.charts)),
        timezone,
    );
    let view = ViewState::new(settings.display.theme, charts);
    let dashboard_service = DashboardService::new(client, settings.sensor.sensor_id, view);

    let scheduler = Arc::new(PollingScheduler::new(
        dashboard_service.clone(),
        settings.fetch_interval(),
        settings.send_interval(),
    ));
    scheduler.activate().await;
    if settings.polling.send_on_start {
        scheduler.start().await;
    }

    let state = Arc::new(AppState {
        dashboard_service,
        scheduler: scheduler.clone(),
        chart_board,
    });

    // Build router (presentation layer)
    let router = presentation::router(state);

    tracing::info!(address = %addr, "Starting sensor-dashboard");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.deactivate().await;
    tracing::info!("Sensor dashboard shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
