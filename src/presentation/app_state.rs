// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::polling_scheduler::PollingScheduler;
use crate::infrastructure::chart_board::ChartBoard;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub scheduler: Arc<PollingScheduler>,
    pub chart_board: ChartBoard,
}
