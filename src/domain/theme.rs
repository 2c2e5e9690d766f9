// Display theme
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayTheme {
    #[default]
    Light,
    Dark,
}

impl DisplayTheme {
    pub fn toggled(self) -> Self {
        match self {
            DisplayTheme::Light => DisplayTheme::Dark,
            DisplayTheme::Dark => DisplayTheme::Light,
        }
    }

    /// Legend text color that stays readable on this theme's background
    pub fn legend_color(self) -> &'static str {
        match self {
            DisplayTheme::Light => "black",
            DisplayTheme::Dark => "white",
        }
    }
}
