// Presentation layer - HTTP routes
pub mod app_state;
pub mod error;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    delete_readings, get_charts, get_readings, get_status, health_check, refresh, send_now,
    set_theme, start_sending, stop_sending, toggle_theme,
};
use axum::Router;
use axum::routing::{get, post, put};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/readings", get(get_readings).delete(delete_readings))
        .route("/charts", get(get_charts))
        .route("/status", get(get_status))
        .route("/refresh", post(refresh))
        .route("/theme", put(set_theme))
        .route("/theme/toggle", post(toggle_theme))
        .route("/send", post(send_now))
        .route("/send/start", post(start_sending))
        .route("/send/stop", post(stop_sending))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
