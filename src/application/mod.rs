// Application layer - Controllers of the dashboard session
pub mod autocomplete;
pub mod history_chart;
pub mod map_controller;
pub mod ports;
pub mod sensor_poller;
pub mod session;
pub mod simulation;
pub mod view;
pub mod weather_service;

#[cfg(test)]
pub mod test_support;
