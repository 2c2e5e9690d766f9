// Synthetic reading generator for demo/testing traffic
use crate::domain::quantity::Quantity;
use crate::domain::reading::SensorReading;
use chrono::{DateTime, Utc};
use rand::Rng;

/// Produces plausible readings with each quantity drawn uniformly from its
/// physical range.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticReadingGenerator;

impl SyntheticReadingGenerator {
    pub fn generate(&self, sensor_id: i64) -> SensorReading {
        self.generate_with(&mut rand::rng(), sensor_id, Utc::now())
    }

    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        sensor_id: i64,
        now: DateTime<Utc>,
    ) -> SensorReading {
        SensorReading {
            sensor_id,
            temperature: rng.random_range(Quantity::Temperature.range()),
            humidity: rng.random_range(Quantity::Humidity.range()),
            vibration: rng.random_range(Quantity::Vibration.range()),
            voltage: rng.random_range(Quantity::Voltage.range()),
            timestamp: now,
        }
    }
}
