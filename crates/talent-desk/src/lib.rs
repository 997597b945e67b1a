pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod extract;
pub mod telemetry;
