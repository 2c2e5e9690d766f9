// Client trait for the remote sensor-ingestion service
use crate::domain::reading::{ReadingSeries, SensorReading};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Transport-level failure: unreachable, refused, timed out
    #[error("sensor service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with a non-success status
    #[error("sensor service rejected request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The service answered 2xx but the body could not be decoded
    #[error("sensor service returned an invalid response: {0}")]
    InvalidResponse(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Single-attempt calls against the ingestion service. No retries happen here;
/// every failure is handed back to the caller.
#[async_trait]
pub trait RemoteSensorClient: Send + Sync {
    /// Every currently stored reading, in the service's order
    async fn fetch_all(&self) -> RemoteResult<ReadingSeries>;

    /// Submit one new reading
    async fn append(&self, reading: &SensorReading) -> RemoteResult<()>;

    /// Delete every stored reading
    async fn clear_all(&self) -> RemoteResult<()>;
}
