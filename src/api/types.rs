//! API request and response types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::devices::{DeviceRegistry, DeviceStatusMap};
use crate::manager::{EnergyDecision, EvaluationContext};
use crate::schedule::ScheduleTable;
use crate::sim::kpi::KpiReport;
use crate::sim::types::{SimConfig, StepResult};

/// Body of `POST /evaluate`.
///
/// `device_priorities` is an ordered array of `{name, priority}` objects so
/// that the scan order survives JSON parsing.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluateRequest {
    pub current_price: f64,
    pub price_threshold: f64,
    pub device_priorities: DeviceRegistry,
    pub current_time: NaiveDateTime,
    pub current_temperature: f64,
    pub desired_temperature_range: (f64, f64),
    pub energy_usage_limit: f64,
    pub total_energy_used_today: f64,
    #[serde(default)]
    pub scheduled_devices: ScheduleTable,
}

impl EvaluateRequest {
    /// Splits the request into engine inputs.
    pub fn into_parts(self) -> (EvaluationContext, DeviceRegistry, ScheduleTable) {
        let ctx = EvaluationContext {
            current_price: self.current_price,
            price_threshold: self.price_threshold,
            current_time: self.current_time,
            current_temperature: self.current_temperature,
            desired_temperature_range: self.desired_temperature_range,
            energy_usage_limit: self.energy_usage_limit,
            total_energy_used_today: self.total_energy_used_today,
        };
        (ctx, self.device_priorities, self.scheduled_devices)
    }
}

/// One entry of the ordered device status list.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DeviceState {
    pub name: String,
    pub on: bool,
}

/// Body of a successful `POST /evaluate`.
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub energy_saving_mode: bool,
    pub device_status: Vec<DeviceState>,
    pub temperature_regulation_active: bool,
    pub total_energy_used: f64,
    pub night_mode: bool,
    pub shed_devices: Vec<String>,
}

fn device_states(status: &DeviceStatusMap) -> Vec<DeviceState> {
    status
        .iter()
        .map(|(name, on)| DeviceState {
            name: name.to_string(),
            on,
        })
        .collect()
}

impl From<EnergyDecision> for EvaluateResponse {
    fn from(d: EnergyDecision) -> Self {
        Self {
            energy_saving_mode: d.energy_saving_mode,
            device_status: device_states(&d.device_status),
            temperature_regulation_active: d.temperature_regulation_active,
            total_energy_used: d.total_energy_used,
            night_mode: d.night_mode,
            shed_devices: d.shed_devices,
        }
    }
}

/// Combined state response: config, KPIs, and latest step.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub config: SimConfig,
    pub kpi: KpiReport,
    pub latest_step: Option<StepResult>,
}

/// Optional range query parameters for the telemetry endpoint.
#[derive(Debug, Deserialize)]
pub struct TelemetryQuery {
    /// Start timestep (inclusive).
    pub from: Option<usize>,
    /// End timestep (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
