// Application layer - Use cases, view state and chart lifecycle
pub mod chart_controller;
pub mod dashboard_service;
pub mod polling_scheduler;
pub mod reading_generator;
pub mod sensor_client;
pub mod view_state;

#[cfg(test)]
pub mod testing;
