// Domain layer - Readings, quantities, themes and chart descriptions
pub mod chart;
pub mod quantity;
pub mod reading;
pub mod theme;
