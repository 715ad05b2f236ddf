pub mod async_helpers;
pub mod configuration;
pub mod delivery;
pub mod domain;
mod error_handling;
pub mod routes;
pub mod startup;
pub mod submission_handler;
pub mod telemetry;
