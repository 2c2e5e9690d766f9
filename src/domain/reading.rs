// Sensor reading domain models
use super::quantity::Quantity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped observation of the four monitored quantities.
///
/// Field names on the wire follow the ingestion service's schema
/// (`temperatura`, `umidade`, `vibracao`, `tensao`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor_id: i64,
    #[serde(rename = "temperatura", deserialize_with = "lenient::number")]
    pub temperature: f64,
    #[serde(rename = "umidade", deserialize_with = "lenient::number")]
    pub humidity: f64,
    #[serde(rename = "vibracao", deserialize_with = "lenient::number")]
    pub vibration: f64,
    #[serde(rename = "tensao", deserialize_with = "lenient::number")]
    pub voltage: f64,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl SensorReading {
    pub fn value(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Temperature => self.temperature,
            Quantity::Humidity => self.humidity,
            Quantity::Vibration => self.vibration,
            Quantity::Voltage => self.voltage,
        }
    }
}

/// The full ordered set of readings, in the order the service returned them.
///
/// Only ever replaced as a whole; there is no append or merge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingSeries(Vec<SensorReading>);

impl ReadingSeries {
    pub fn new(readings: Vec<SensorReading>) -> Self {
        Self(readings)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SensorReading> {
        self.0.iter()
    }

    /// Values of one quantity, in series order
    pub fn values(&self, quantity: Quantity) -> Vec<f64> {
        self.0.iter().map(|r| r.value(quantity)).collect()
    }
}

impl From<Vec<SensorReading>> for ReadingSeries {
    fn from(readings: Vec<SensorReading>) -> Self {
        Self(readings)
    }
}

/// RFC 3339 timestamps, written in UTC with millisecond precision.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Numeric columns sometimes arrive as decimal strings (e.g. `"21.50"`).
mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(value) => Ok(value),
            NumberOrString::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}
