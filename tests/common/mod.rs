//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use home_ems::devices::DeviceRegistry;
use home_ems::manager::{EnergyDecision, EnergyManager, EvaluationContext};
use home_ems::schedule::ScheduleTable;

/// 2025-10-16 at the given hour and minute.
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 16)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid timestamp")
}

/// Low price, 14:00, 22 degrees in [20, 24], 25 used of 50.
pub fn quiet_context() -> EvaluationContext {
    EvaluationContext {
        current_price: 0.15,
        price_threshold: 0.20,
        current_time: at(14, 0),
        current_temperature: 22.0,
        desired_temperature_range: (20.0, 24.0),
        energy_usage_limit: 50.0,
        total_energy_used_today: 25.0,
    }
}

/// Builds a registry from `(name, priority)` pairs in order.
pub fn registry(devices: &[(&str, u32)]) -> DeviceRegistry {
    devices.iter().map(|&(n, p)| (n, p)).collect()
}

/// Evaluates with the default manager, panicking on validation errors.
pub fn run(
    ctx: &EvaluationContext,
    registry: &DeviceRegistry,
    schedule: &ScheduleTable,
) -> EnergyDecision {
    EnergyManager::default()
        .evaluate(ctx, registry, schedule)
        .expect("inputs should be valid")
}

/// Number of devices switched off in the decision.
pub fn count_off(decision: &EnergyDecision) -> usize {
    decision.device_status.iter().filter(|&(_, on)| !on).count()
}
