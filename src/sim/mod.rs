/// Tick clock for the runner.
pub mod clock;
pub mod engine;
pub mod kpi;
/// Price and temperature signals.
pub mod profile;
pub mod types;
