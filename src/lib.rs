//! Smart home energy-management rule engine.
//!
//! [`manager::EnergyManager`] turns one tick of caller-supplied signals into
//! device on/off decisions; [`sim`] drives it over a simulated day.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod devices;
pub mod error;
pub mod io;
pub mod manager;
/// Price, night, climate, budget and schedule rule stages.
pub mod rules;
pub mod schedule;
/// Caller-side runner, signals and KPIs.
pub mod sim;

pub use error::{EngineError, EngineResult};
pub use manager::{EnergyDecision, EnergyManager, EvaluationContext, evaluate};
