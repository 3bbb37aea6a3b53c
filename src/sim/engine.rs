//! Day runner: plays the caller of the rule engine, one evaluation per tick.

use chrono::Timelike;
use tracing::{debug, info};

use crate::config::ScenarioConfig;
use crate::devices::{COOLING, DeviceRegistry, HEATING};
use crate::error::EngineResult;
use crate::manager::{EnergyManager, EvaluationContext};
use crate::schedule::ScheduleTable;

use super::clock::{Clock, Tick};
use super::profile::{PriceProfile, TemperatureProfile};
use super::types::{SimConfig, StepResult, UsageModel};

/// Owns the registry, schedule and signals, and persists the running usage
/// counter between ticks. The [`EnergyManager`] it calls stays stateless.
pub struct Engine {
    config: SimConfig,
    manager: EnergyManager,
    registry: DeviceRegistry,
    schedule: ScheduleTable,
    prices: PriceProfile,
    price_threshold: f64,
    comfort_range: (f64, f64),
    temperature: TemperatureProfile,
    usage: UsageModel,
    usage_today: f64,
}

impl Engine {
    /// Creates a new runner.
    ///
    /// # Arguments
    ///
    /// * `config` - Timing configuration
    /// * `manager` - Rule engine to call each tick
    /// * `registry` - Devices, in scan order
    /// * `schedule` - Scheduled activations
    /// * `prices` - Price signal
    /// * `price_threshold` - Saving-mode threshold
    /// * `comfort_range` - Desired temperature range `(low, high)`
    /// * `temperature` - Indoor temperature signal
    /// * `usage` - Budget and accrual model
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        config: SimConfig,
        manager: EnergyManager,
        registry: DeviceRegistry,
        schedule: ScheduleTable,
        prices: PriceProfile,
        price_threshold: f64,
        comfort_range: (f64, f64),
        temperature: TemperatureProfile,
        usage: UsageModel,
    ) -> Self {
        Self {
            config,
            manager,
            registry,
            schedule,
            prices,
            price_threshold,
            comfort_range,
            temperature,
            usage_today: usage.initial,
            usage,
        }
    }

    /// Builds a runner from a scenario.
    ///
    /// # Panics
    ///
    /// Panics if the scenario's timing is invalid; call
    /// [`ScenarioConfig::validate`] first.
    pub fn from_scenario(scenario: &ScenarioConfig) -> Self {
        let s = &scenario.simulation;
        let config = SimConfig::new(s.start, s.steps_per_day, s.days, s.seed);

        let p = &scenario.pricing;
        let prices = PriceProfile {
            base_price: p.base_price,
            peak_price: p.peak_price,
            peak_start_hour: p.peak_start_hour,
            peak_end_hour: p.peak_end_hour,
        };

        let c = &scenario.climate;
        let temperature = TemperatureProfile::new(
            c.mean_temp,
            c.amp_temp,
            c.phase_rad,
            c.noise_std,
            s.steps_per_day,
            s.seed,
        );

        let b = &scenario.budget;
        let usage = UsageModel {
            limit: b.usage_limit,
            initial: b.initial_usage,
            per_device_hour: b.usage_per_device_hour,
        };

        Self::new(
            config,
            EnergyManager::new(scenario.night.clone()),
            scenario.registry(),
            scenario.schedule_table(),
            prices,
            p.threshold,
            (c.low, c.high),
            temperature,
            usage,
        )
    }

    /// Evaluates one tick and persists the resulting usage.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from the rule engine.
    pub fn step(&mut self, tick: Tick) -> EngineResult<StepResult> {
        if tick.new_day {
            debug!(time = %tick.time, "new day, usage counter reset");
            self.usage_today = 0.0;
        }

        let price = self.prices.price_at(tick.time.hour());
        let temperature = self.temperature.temperature_at(tick.index);
        let usage_before = self.usage_today;

        let ctx = EvaluationContext {
            current_price: price,
            price_threshold: self.price_threshold,
            current_time: tick.time,
            current_temperature: temperature,
            desired_temperature_range: self.comfort_range,
            energy_usage_limit: self.usage.limit,
            total_energy_used_today: usage_before,
        };
        let decision = self.manager.evaluate(&ctx, &self.registry, &self.schedule)?;

        let devices_on = decision.device_status.count_on();
        let active_devices = decision
            .device_status
            .iter()
            .filter(|&(_, on)| on)
            .map(|(name, _)| name.to_string())
            .collect();
        let usage_after = decision.total_energy_used;
        let usage_persisted = usage_after + self.usage.accrual(devices_on, self.config.dt_hours);
        self.usage_today = usage_persisted;

        Ok(StepResult {
            timestep: tick.index,
            time: tick.time,
            price,
            temperature,
            saving_mode: decision.energy_saving_mode,
            night_mode: decision.night_mode,
            regulation_active: decision.temperature_regulation_active,
            heating: decision.device_status.is_on(HEATING),
            cooling: decision.device_status.is_on(COOLING),
            devices_on,
            active_devices,
            shed_devices: decision.shed_devices,
            usage_before,
            usage_after,
            usage_persisted,
            budget_met: usage_after < self.usage.limit,
        })
    }

    /// Runs every tick and returns the complete step record vector.
    ///
    /// # Errors
    ///
    /// Stops at the first tick the rule engine rejects.
    pub fn run(&mut self) -> EngineResult<Vec<StepResult>> {
        let mut clock = Clock::new(&self.config);
        let mut results = Vec::with_capacity(clock.remaining());
        while let Some(tick) = clock.tick() {
            results.push(self.step(tick)?);
        }
        info!(
            steps = results.len(),
            devices = self.registry.len(),
            final_usage = self.usage_today,
            "run complete"
        );
        Ok(results)
    }

    /// Usage counter as persisted after the last tick.
    pub fn usage_today(&self) -> f64 {
        self.usage_today
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
