use crate::domain::quantity::Quantity;
use crate::domain::theme::DisplayTheme;
use anyhow::{Context, bail};
use chrono_tz::Tz;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

/// Longest accepted timer period (one week)
const MAX_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;
/// Longest accepted request timeout (one hour)
const MAX_TIMEOUT_SECS: u64 = 60 * 60;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub remote: RemoteSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub sensor: SensorSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingSettings {
    #[serde(default = "default_interval_secs")]
    pub fetch_interval_secs: u64,
    #[serde(default = "default_interval_secs")]
    pub send_interval_secs: u64,
    #[serde(default)]
    pub send_on_start: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SensorSettings {
    #[serde(default = "default_sensor_id")]
    pub sensor_id: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    #[serde(default)]
    pub theme: DisplayTheme,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Quantities that have a render target
    #[serde(default = "default_charts")]
    pub charts: Vec<Quantity>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_interval_secs() -> u64 {
    300
}

fn default_sensor_id() -> i64 {
    1
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_charts() -> Vec<Quantity> {
    Quantity::ALL.to_vec()
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            fetch_interval_secs: default_interval_secs(),
            send_interval_secs: default_interval_secs(),
            send_on_start: false,
        }
    }
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            sensor_id: default_sensor_id(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: DisplayTheme::default(),
            timezone: default_timezone(),
            charts: default_charts(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Settings {
    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.polling.fetch_interval_secs)
    }

    pub fn send_interval(&self) -> Duration {
        Duration::from_secs(self.polling.send_interval_secs)
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote.timeout_secs)
    }

    pub fn timezone(&self) -> anyhow::Result<Tz> {
        self.display
            .timezone
            .parse::<Tz>()
            .map_err(|e| {
                anyhow::anyhow!("invalid display.timezone '{}': {}", self.display.timezone, e)
            })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .bind_addr
            .parse()
            .with_context(|| format!("invalid server.bind_addr '{}'", self.server.bind_addr))
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        check_range(
            "polling.fetch_interval_secs",
            self.polling.fetch_interval_secs,
            MAX_INTERVAL_SECS,
        )?;
        check_range(
            "polling.send_interval_secs",
            self.polling.send_interval_secs,
            MAX_INTERVAL_SECS,
        )?;
        check_range("remote.timeout_secs", self.remote.timeout_secs, MAX_TIMEOUT_SECS)?;
        let base_url = &self.remote.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("remote.base_url must be an http(s) URL, got '{}'", base_url);
        }
        self.timezone()?;
        self.bind_addr()?;
        Ok(())
    }
}

fn check_range(key: &str, value: u64, max: u64) -> anyhow::Result<()> {
    if value == 0 || value > max {
        bail!("{} must be between 1 and {}, got {}", key, max, value);
    }
    Ok(())
}

/// `DASHBOARD__SECTION__KEY` variables; `DASHBOARD__DISPLAY__CHARTS` is comma-separated
fn environment() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("display.charts")
}

/// Load settings from `config/dashboard.*` (optional) and `DASHBOARD__*` environment variables
pub fn load_settings() -> anyhow::Result<Settings> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(environment());
    settings_from(builder)
}

fn settings_from(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<Settings> {
    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
