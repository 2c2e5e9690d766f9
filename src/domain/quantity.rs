// Monitored physical quantities
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    Temperature,
    Humidity,
    Vibration,
    Voltage,
}

impl Quantity {
    /// Every quantity, in chart display order.
    pub const ALL: [Quantity; 4] = [
        Quantity::Temperature,
        Quantity::Humidity,
        Quantity::Vibration,
        Quantity::Voltage,
    ];

    /// Legend label, in the same pt-BR locale as the time labels
    pub fn label(self) -> &'static str {
        match self {
            Quantity::Temperature => "Temperatura",
            Quantity::Humidity => "Umidade",
            Quantity::Vibration => "Vibração",
            Quantity::Voltage => "Tensão",
        }
    }

    /// Line color used for this quantity's series
    pub fn color(self) -> &'static str {
        match self {
            Quantity::Temperature => "rgb(227, 15, 89)",
            Quantity::Humidity => "rgb(54, 162, 235)",
            Quantity::Vibration => "rgb(75, 192, 192)",
            Quantity::Voltage => "rgb(255, 206, 86)",
        }
    }

    /// Physical range a plausible reading falls in
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Quantity::Temperature => 0.0..=50.0,
            Quantity::Humidity => 0.0..=100.0,
            Quantity::Vibration => 0.0..=10.0,
            Quantity::Voltage => 0.0..=220.0,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Temperature => "temperature",
            Quantity::Humidity => "humidity",
            Quantity::Vibration => "vibration",
            Quantity::Voltage => "voltage",
        };
        f.write_str(name)
    }
}
