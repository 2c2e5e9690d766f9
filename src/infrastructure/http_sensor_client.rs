// HTTP client for the sensor-ingestion service
use crate::application::sensor_client::{RemoteError, RemoteResult, RemoteSensorClient};
use crate::domain::reading::{ReadingSeries, SensorReading};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

const READINGS_PATH: &str = "/dados-sensores";
const INSERT_PATH: &str = "/inserir-dados-sensor";
const CLEAR_PATH: &str = "/limpar-dados";

#[derive(Debug, Clone)]
pub struct HttpSensorClient {
    client: Client,
    base_url: String,
}

impl HttpSensorClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success status into `Rejected`, keeping the body for the log
    async fn check_status(response: Response) -> RemoteResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(body) if !body.is_empty() => body,
            _ => status.canonical_reason().unwrap_or("unknown status").to_string(),
        };
        Err(RemoteError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

fn transport_error(e: reqwest::Error) -> RemoteError {
    RemoteError::Unavailable(e.to_string())
}

#[async_trait]
impl RemoteSensorClient for HttpSensorClient {
    async fn fetch_all(&self) -> RemoteResult<ReadingSeries> {
        let response = self
            .client
            .get(self.url(READINGS_PATH))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let response = Self::check_status(response).await?;

        response.json::<ReadingSeries>().await.map_err(|e| {
            if e.is_decode() {
                RemoteError::InvalidResponse(e.to_string())
            } else {
                transport_error(e)
            }
        })
    }

    async fn append(&self, reading: &SensorReading) -> RemoteResult<()> {
        let response = self
            .client
            .post(self.url(INSERT_PATH))
            .json(reading)
            .send()
            .await
            .map_err(transport_error)?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn clear_all(&self) -> RemoteResult<()> {
        let response = self
            .client
            .delete(self.url(CLEAR_PATH))
            .send()
            .await
            .map_err(transport_error)?;

        Self::check_status(response).await?;
        Ok(())
    }
}
