use crate::application::sensor_client::RemoteError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failed user action, mapped onto an HTTP status
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Remote(RemoteError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Remote(RemoteError::Rejected { .. } | RemoteError::InvalidResponse(_)) => {
                StatusCode::BAD_GATEWAY
            }
        };
        tracing::warn!(error = %self, %status, "Dashboard action failed");

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
