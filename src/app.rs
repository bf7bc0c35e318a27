pub use configuration::*;
pub use database::{open_database, Migrator, MIGRATIONS};
pub use request_tracing::{RequestTrace, RequestTracing};
pub use startup::{run, NewsletterApp, StartupError};
pub use telemetry::setup_tracing;

mod configuration;
mod database;
mod request_tracing;
mod startup;
mod telemetry;
