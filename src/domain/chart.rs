// Declarative chart descriptions handed to the rendering engine
use super::quantity::Quantity;
use super::reading::ReadingSeries;
use super::theme::DisplayTheme;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

const LABEL_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";
const Y_AXIS_TITLE: &str = "Valores";
const TICK_FONT_SIZE: u32 = 14;
const TITLE_FONT_SIZE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub begin_at_zero: bool,
    pub title: Option<String>,
    pub tick_font_size: u32,
    pub title_font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSpec {
    pub text_color: String,
    pub font_size: u32,
}

/// Everything the rendering engine needs to draw one quantity's chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub quantity: Quantity,
    pub kind: ChartKind,
    pub label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: String,
    pub legend: LegendSpec,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
}

impl ChartSpec {
    pub fn build(
        quantity: Quantity,
        series: &ReadingSeries,
        theme: DisplayTheme,
        timezone: Tz,
    ) -> Self {
        let labels = series
            .iter()
            .map(|reading| format_label(reading.timestamp, timezone))
            .collect();

        Self {
            quantity,
            kind: ChartKind::Line,
            label: quantity.label().to_string(),
            labels,
            values: series.values(quantity),
            color: quantity.color().to_string(),
            legend: LegendSpec {
                text_color: theme.legend_color().to_string(),
                font_size: TITLE_FONT_SIZE,
            },
            x_axis: AxisSpec {
                begin_at_zero: false,
                title: None,
                tick_font_size: TICK_FONT_SIZE,
                title_font_size: TITLE_FONT_SIZE,
            },
            y_axis: AxisSpec {
                begin_at_zero: true,
                title: Some(Y_AXIS_TITLE.to_string()),
                tick_font_size: TICK_FONT_SIZE,
                title_font_size: TITLE_FONT_SIZE,
            },
        }
    }
}

/// Format a reading timestamp as a local date-time label (`dd/mm/YYYY, HH:MM:SS`).
pub fn format_label(timestamp: DateTime<Utc>, timezone: Tz) -> String {
    timestamp.with_timezone(&timezone).format(LABEL_FORMAT).to_string()
}
