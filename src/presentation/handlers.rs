// HTTP request handlers - The dashboard's control surface
use crate::domain::theme::DisplayTheme;
use crate::infrastructure::chart_board::PublishedChart;
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiResult;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ThemeRequest {
    pub theme: DisplayTheme,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub fetch_active: bool,
    pub send_armed: bool,
    pub theme: DisplayTheme,
    pub reading_count: usize,
    pub chart_count: usize,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current view state: theme plus the full reading series
pub async fn get_readings(State(state): State<Arc<AppState>>) -> Json<Value> {
    let snapshot = state.dashboard_service.snapshot().await;
    Json(json!({
        "theme": snapshot.theme,
        "readings": snapshot.readings,
    }))
}

/// Published chart descriptions
pub async fn get_charts(State(state): State<Arc<AppState>>) -> Json<Vec<PublishedChart>> {
    Json(state.chart_board.charts())
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.dashboard_service.snapshot().await;
    Json(StatusResponse {
        fetch_active: state.scheduler.is_active().await,
        send_armed: state.scheduler.is_sending().await,
        theme: snapshot.theme,
        reading_count: snapshot.readings.len(),
        chart_count: snapshot.chart_count,
    })
}

/// Fetch the series now instead of waiting for the next tick
pub async fn refresh(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let count = state.dashboard_service.refresh().await?;
    Ok(Json(json!({ "reading_count": count })))
}

pub async fn toggle_theme(State(state): State<Arc<AppState>>) -> Json<Value> {
    let theme = state.dashboard_service.toggle_theme().await;
    Json(json!({ "theme": theme }))
}

pub async fn set_theme(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ThemeRequest>,
) -> Json<Value> {
    state.dashboard_service.set_theme(request.theme).await;
    Json(json!({ "theme": request.theme }))
}

/// One-shot send, independent of the send timer
pub async fn send_now(State(state): State<Arc<AppState>>) -> ApiResult<(StatusCode, Json<Value>)> {
    let reading = state.dashboard_service.send_now().await?;
    Ok((StatusCode::CREATED, Json(json!({ "reading": reading }))))
}

pub async fn start_sending(State(state): State<Arc<AppState>>) -> Json<Value> {
    let changed = state.scheduler.start().await;
    Json(json!({ "send_armed": true, "changed": changed }))
}

pub async fn stop_sending(State(state): State<Arc<AppState>>) -> Json<Value> {
    let changed = state.scheduler.stop().await;
    Json(json!({ "send_armed": false, "changed": changed }))
}

pub async fn delete_readings(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.dashboard_service.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
