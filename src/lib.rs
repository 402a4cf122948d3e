pub mod client;
pub mod configuration;
pub mod domain;
pub mod email_client;
mod error_handling;
pub mod mail_relay;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod templates;
