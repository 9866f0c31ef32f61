pub use configuration::*;
pub use startup::DispatchApp;
pub use telemetry::setup_tracing;

mod configuration;
mod startup;
mod telemetry;
