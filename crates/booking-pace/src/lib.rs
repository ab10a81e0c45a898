pub mod config;
pub mod error;
pub mod pace;
pub mod reservations;
pub mod telemetry;
