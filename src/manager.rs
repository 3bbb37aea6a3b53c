//! Pipeline orchestrator: builds the status map and threads it through the
//! price, night, climate, budget and schedule stages in that order.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::devices::{DeviceRegistry, DeviceStatusMap};
use crate::error::{EngineError, EngineResult};
use crate::rules::{BudgetEnforcer, ClimateRule, NightPolicy, PriceRule, ScheduleOverride};
use crate::schedule::ScheduleTable;

/// Per-call signals supplied by the caller. Nothing here is re-derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationContext {
    /// Current energy price.
    pub current_price: f64,
    /// Price above which saving mode engages.
    pub price_threshold: f64,
    /// Wall-clock instant of this evaluation.
    pub current_time: NaiveDateTime,
    /// Measured indoor temperature.
    pub current_temperature: f64,
    /// Comfort band `(low, high)`, inclusive at both ends.
    pub desired_temperature_range: (f64, f64),
    /// Usage budget for the day.
    pub energy_usage_limit: f64,
    /// Cumulative usage so far today.
    pub total_energy_used_today: f64,
}

impl EvaluationContext {
    /// Rejects non-finite numbers, an inverted comfort band, and negative
    /// usage or budget.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> EngineResult<()> {
        let (low, high) = self.desired_temperature_range;
        let fields = [
            ("current_price", self.current_price),
            ("price_threshold", self.price_threshold),
            ("current_temperature", self.current_temperature),
            ("desired_temperature_range.low", low),
            ("desired_temperature_range.high", high),
            ("energy_usage_limit", self.energy_usage_limit),
            ("total_energy_used_today", self.total_energy_used_today),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EngineError::NonFinite { field });
        }
        if low > high {
            return Err(EngineError::InvertedTemperatureRange { low, high });
        }
        if self.total_energy_used_today < 0.0 {
            return Err(EngineError::NegativeUsage(self.total_energy_used_today));
        }
        if self.energy_usage_limit < 0.0 {
            return Err(EngineError::NegativeBudget(self.energy_usage_limit));
        }
        Ok(())
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyDecision {
    /// Price strictly above threshold.
    pub energy_saving_mode: bool,
    /// Final on/off map: registry devices, `Heating`, `Cooling`, and any
    /// scheduled device not in the registry.
    pub device_status: DeviceStatusMap,
    /// Temperature strictly outside the comfort band.
    pub temperature_regulation_active: bool,
    /// Usage after shedding; never above the supplied usage.
    pub total_energy_used: f64,
    /// Night window was active.
    pub night_mode: bool,
    /// Devices turned off by the budget loop, in shed order.
    pub shed_devices: Vec<String>,
}

/// Stateless rule engine.
///
/// Holds only its night policy; every call builds and discards its own
/// working state, so one manager can serve any number of callers.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use home_ems::devices::DeviceRegistry;
/// use home_ems::manager::{EnergyManager, EvaluationContext};
/// use home_ems::schedule::ScheduleTable;
///
/// let ctx = EvaluationContext {
///     current_price: 0.25,
///     price_threshold: 0.20,
///     current_time: NaiveDate::from_ymd_opt(2025, 10, 16)
///         .and_then(|d| d.and_hms_opt(14, 0, 0))
///         .unwrap(),
///     current_temperature: 22.0,
///     desired_temperature_range: (20.0, 24.0),
///     energy_usage_limit: 50.0,
///     total_energy_used_today: 25.0,
/// };
/// let registry = DeviceRegistry::new().with("Fridge", 1).with("TV", 3);
/// let decision = EnergyManager::default()
///     .evaluate(&ctx, &registry, &ScheduleTable::new())
///     .unwrap();
/// assert!(decision.energy_saving_mode);
/// assert_eq!(decision.device_status.get("TV"), Some(false));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnergyManager {
    night: NightPolicy,
}

impl EnergyManager {
    /// Creates a manager with a custom night policy.
    pub fn new(night: NightPolicy) -> Self {
        Self { night }
    }

    /// Runs the full rule pipeline for one tick.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the registry or context is malformed.
    /// No rule stage can fail on validated input.
    pub fn evaluate(
        &self,
        ctx: &EvaluationContext,
        registry: &DeviceRegistry,
        schedule: &ScheduleTable,
    ) -> EngineResult<EnergyDecision> {
        registry.validate()?;
        ctx.validate()?;

        let mut status = DeviceStatusMap::initial(registry);

        let energy_saving_mode =
            PriceRule.apply(ctx.current_price, ctx.price_threshold, registry, &mut status);
        let night_mode = self.night.apply(ctx.current_time, registry, &mut status);
        let temperature_regulation_active = ClimateRule.apply(
            ctx.current_temperature,
            ctx.desired_temperature_range,
            &mut status,
        );
        let outcome = BudgetEnforcer.apply(
            registry,
            &mut status,
            ctx.total_energy_used_today,
            ctx.energy_usage_limit,
        );
        ScheduleOverride.apply(schedule, ctx.current_time, &mut status);

        debug!(
            time = %ctx.current_time,
            energy_saving_mode,
            night_mode,
            temperature_regulation_active,
            usage = outcome.usage,
            shed = outcome.shed.len(),
            "evaluation complete"
        );

        Ok(EnergyDecision {
            energy_saving_mode,
            device_status: status,
            temperature_regulation_active,
            total_energy_used: outcome.usage,
            night_mode,
            shed_devices: outcome.shed,
        })
    }
}

/// Evaluates one tick with the default night policy.
///
/// Convenience wrapper over [`EnergyManager::evaluate`] taking the signals
/// as separate arguments.
///
/// # Errors
///
/// See [`EnergyManager::evaluate`].
#[expect(clippy::too_many_arguments)]
pub fn evaluate(
    current_price: f64,
    price_threshold: f64,
    device_priorities: &DeviceRegistry,
    current_time: NaiveDateTime,
    current_temperature: f64,
    desired_temperature_range: (f64, f64),
    energy_usage_limit: f64,
    total_energy_used_today: f64,
    scheduled_devices: &ScheduleTable,
) -> EngineResult<EnergyDecision> {
    let ctx = EvaluationContext {
        current_price,
        price_threshold,
        current_time,
        current_temperature,
        desired_temperature_range,
        energy_usage_limit,
        total_energy_used_today,
    };
    EnergyManager::default().evaluate(&ctx, device_priorities, scheduled_devices)
}
