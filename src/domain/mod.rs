// Domain layer - Plain data for the dashboard session
pub mod chart;
pub mod coordinate;
pub mod map;
pub mod sensor;
pub mod suggestion;
pub mod weather;
