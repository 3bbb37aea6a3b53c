//! Runner types: timing configuration, usage accrual and per-tick records.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// Timing configuration for a simulated run.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use home_ems::sim::types::SimConfig;
///
/// let start = NaiveDate::from_ymd_opt(2025, 10, 16)
///     .and_then(|d| d.and_hms_opt(0, 0, 0))
///     .unwrap();
/// let cfg = SimConfig::new(start, 24, 1, 42);
/// assert_eq!(cfg.dt_hours, 1.0);
/// assert_eq!(cfg.total_steps(), 24);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SimConfig {
    /// Instant of tick 0.
    pub start: NaiveDateTime,
    /// Number of ticks per simulated day.
    pub steps_per_day: usize,
    /// Number of days to simulate.
    pub days: usize,
    /// Duration of one tick in hours, derived as `24.0 / steps_per_day`.
    pub dt_hours: f64,
    /// Seed for the temperature noise.
    pub seed: u64,
}

impl SimConfig {
    /// Creates a new timing configuration.
    ///
    /// # Panics
    ///
    /// Panics if `steps_per_day` or `days` is zero, or if `steps_per_day`
    /// does not divide a day into whole minutes.
    pub fn new(start: NaiveDateTime, steps_per_day: usize, days: usize, seed: u64) -> Self {
        assert!(steps_per_day > 0, "steps_per_day must be > 0");
        assert!(days > 0, "days must be > 0");
        assert!(1440 % steps_per_day == 0, "steps_per_day must divide 1440");
        Self {
            start,
            steps_per_day,
            days,
            dt_hours: 24.0 / steps_per_day as f64,
            seed,
        }
    }

    /// Total number of ticks across all days.
    pub fn total_steps(&self) -> usize {
        self.steps_per_day * self.days
    }

    /// Instant of tick `t`.
    pub fn time_at(&self, t: usize) -> NaiveDateTime {
        let minutes = (t * (1440 / self.steps_per_day)) as i64;
        self.start + Duration::minutes(minutes)
    }

    /// Returns `true` if tick `t` opens a new day (tick 0 excluded).
    pub fn is_day_boundary(&self, t: usize) -> bool {
        t > 0 && t % self.steps_per_day == 0
    }
}

/// How the caller persists the running usage counter between ticks.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UsageModel {
    /// Daily usage budget passed to every evaluation.
    pub limit: f64,
    /// Usage already consumed before tick 0.
    pub initial: f64,
    /// Usage accrued per hour by each device that ends a tick on.
    pub per_device_hour: f64,
}

impl UsageModel {
    /// Usage accrued over one tick of `dt_hours` with `devices_on` devices on.
    pub fn accrual(&self, devices_on: usize, dt_hours: f64) -> f64 {
        devices_on as f64 * self.per_device_hour * dt_hours
    }
}

/// Complete record of one tick.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// Tick index.
    pub timestep: usize,
    /// Wall-clock instant of the tick.
    pub time: NaiveDateTime,
    /// Price signal at this tick.
    pub price: f64,
    /// Indoor temperature at this tick.
    pub temperature: f64,
    pub saving_mode: bool,
    pub night_mode: bool,
    pub regulation_active: bool,
    pub heating: bool,
    pub cooling: bool,
    /// Devices on after all rules, actuators included.
    pub devices_on: usize,
    /// Names of the devices left on, in status-map order.
    pub active_devices: Vec<String>,
    /// Devices turned off by the budget loop, in shed order.
    pub shed_devices: Vec<String>,
    /// Usage passed in to the evaluation.
    pub usage_before: f64,
    /// Usage returned by the evaluation.
    pub usage_after: f64,
    /// Usage persisted for the next tick (after accrual).
    pub usage_persisted: f64,
    /// Usage ended strictly below the budget.
    pub budget_met: bool,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>3} {} | price={:.3} temp={:>5.1} | save={} night={} clim={} \
             (heat={} cool={}) | on={:>2} shed={} | usage {:.2} -> {:.2} ok={}",
            self.timestep,
            self.time.format("%Y-%m-%d %H:%M"),
            self.price,
            self.temperature,
            self.saving_mode,
            self.night_mode,
            self.regulation_active,
            self.heating,
            self.cooling,
            self.devices_on,
            self.shed_devices.len(),
            self.usage_before,
            self.usage_after,
            self.budget_met,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 16)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid timestamp")
    }

    #[test]
    fn sim_config_basic() {
        let cfg = SimConfig::new(start(), 24, 1, 42);
        assert_eq!(cfg.steps_per_day, 24);
        assert_eq!(cfg.dt_hours, 1.0);
        assert_eq!(cfg.total_steps(), 24);
    }

    #[test]
    fn sim_config_multi_day() {
        let cfg = SimConfig::new(start(), 48, 3, 0);
        assert_eq!(cfg.total_steps(), 144);
        assert_eq!(cfg.dt_hours, 0.5);
        assert_eq!(cfg.time_at(3), start() + Duration::minutes(90));
        assert!(cfg.is_day_boundary(48));
        assert!(!cfg.is_day_boundary(0));
        assert!(!cfg.is_day_boundary(47));
    }

    #[test]
    #[should_panic]
    fn sim_config_zero_steps_panics() {
        SimConfig::new(start(), 0, 1, 0);
    }

    #[test]
    #[should_panic]
    fn sim_config_zero_days_panics() {
        SimConfig::new(start(), 24, 0, 0);
    }

    #[test]
    fn accrual_scales_with_devices_and_duration() {
        let model = UsageModel {
            limit: 30.0,
            initial: 0.0,
            per_device_hour: 0.5,
        };
        assert_eq!(model.accrual(4, 1.0), 2.0);
        assert_eq!(model.accrual(4, 0.5), 1.0);
        assert_eq!(model.accrual(0, 1.0), 0.0);
    }

    #[test]
    fn step_result_display_does_not_panic() {
        let r = StepResult {
            timestep: 0,
            time: start(),
            price: 0.15,
            temperature: 21.5,
            saving_mode: false,
            night_mode: true,
            regulation_active: false,
            heating: false,
            cooling: false,
            devices_on: 2,
            active_devices: vec!["Security".into(), "Refrigerator".into()],
            shed_devices: Vec::new(),
            usage_before: 0.0,
            usage_after: 0.0,
            usage_persisted: 0.5,
            budget_met: true,
        };
        let s = format!("{r}");
        assert!(s.contains("2025-10-16 00:00"));
    }
}
