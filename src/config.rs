//! TOML-based scenario configuration and preset definitions.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use crate::devices::DeviceRegistry;
use crate::rules::NightPolicy;
use crate::schedule::{ScheduleEntry, ScheduleTable};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing and global parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Hourly price signal and saving-mode threshold.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Comfort band and indoor temperature profile.
    #[serde(default)]
    pub climate: ClimateConfig,
    /// Daily usage budget and accrual model.
    #[serde(default)]
    pub budget: BudgetConfig,
    /// Night window and exempt devices.
    #[serde(default)]
    pub night: NightPolicy,
    /// Registered devices, in scan order.
    #[serde(default = "default_devices")]
    pub devices: Vec<DeviceConfig>,
    /// Scheduled activations.
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
}

/// Simulation timing and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Instant of the first tick.
    pub start: NaiveDateTime,
    /// Number of ticks per simulated day (must divide 1440).
    pub steps_per_day: usize,
    /// Number of days to simulate (must be > 0).
    pub days: usize,
    /// Seed for the temperature noise.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            steps_per_day: 24,
            days: 1,
            seed: 42,
        }
    }
}

/// Two-level tariff with a daily peak window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Off-peak price per unit.
    pub base_price: f64,
    /// Peak price per unit.
    pub peak_price: f64,
    /// Peak window start hour (inclusive).
    pub peak_start_hour: u32,
    /// Peak window end hour (exclusive).
    pub peak_end_hour: u32,
    /// Saving mode engages strictly above this price.
    pub threshold: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_price: 0.15,
            peak_price: 0.25,
            peak_start_hour: 17,
            peak_end_hour: 21,
            threshold: 0.20,
        }
    }
}

/// Comfort band and sinusoidal indoor temperature profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClimateConfig {
    /// Lower comfort bound (inclusive).
    pub low: f64,
    /// Upper comfort bound (inclusive).
    pub high: f64,
    /// Mean indoor temperature.
    pub mean_temp: f64,
    /// Daily swing amplitude.
    pub amp_temp: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Gaussian noise standard deviation.
    pub noise_std: f64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            low: 20.0,
            high: 24.0,
            mean_temp: 22.0,
            amp_temp: 3.0,
            phase_rad: 1.6,
            noise_std: 0.2,
        }
    }
}

/// Daily usage budget and how the caller accrues usage between ticks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BudgetConfig {
    /// Usage limit per day.
    pub usage_limit: f64,
    /// Usage already consumed before the first tick.
    pub initial_usage: f64,
    /// Usage accrued per hour by each device left on.
    pub usage_per_device_hour: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            usage_limit: 30.0,
            initial_usage: 0.0,
            usage_per_device_hour: 0.25,
        }
    }
}

/// One registered device.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    pub name: String,
    pub priority: u32,
}

fn default_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 16)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn default_devices() -> Vec<DeviceConfig> {
    [
        ("Security", 1),
        ("Refrigerator", 1),
        ("Lights", 2),
        ("Washer", 2),
        ("TV", 3),
        ("GameConsole", 3),
    ]
    .into_iter()
    .map(|(name, priority)| DeviceConfig {
        name: name.to_string(),
        priority,
    })
    .collect()
}

fn at_hour(start: NaiveDateTime, hour: u32) -> NaiveDateTime {
    start
        .date()
        .and_hms_opt(hour, 0, 0)
        .unwrap_or(start)
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.steps_per_day"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: mild prices, comfortable budget.
    pub fn baseline() -> Self {
        let simulation = SimulationConfig::default();
        let schedule = vec![ScheduleEntry::new("Washer", at_hour(simulation.start, 18))];
        Self {
            simulation,
            pricing: PricingConfig::default(),
            climate: ClimateConfig::default(),
            budget: BudgetConfig::default(),
            night: NightPolicy::default(),
            devices: default_devices(),
            schedule,
        }
    }

    /// Returns the price-spike preset: a long, high evening peak.
    pub fn price_spike() -> Self {
        Self {
            pricing: PricingConfig {
                peak_price: 0.45,
                peak_start_hour: 12,
                peak_end_hour: 22,
                ..PricingConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the tight-budget preset: budget nearly exhausted at start.
    pub fn tight_budget() -> Self {
        Self {
            budget: BudgetConfig {
                usage_limit: 12.0,
                initial_usage: 10.0,
                usage_per_device_hour: 0.5,
            },
            climate: ClimateConfig {
                mean_temp: 19.0,
                ..ClimateConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "price_spike", "tight_budget"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "price_spike" => Ok(Self::price_spike()),
            "tight_budget" => Ok(Self::tight_budget()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Builds the device registry in declaration order.
    pub fn registry(&self) -> DeviceRegistry {
        self.devices
            .iter()
            .map(|d| (d.name.clone(), d.priority))
            .collect()
    }

    /// Builds the schedule table in declaration order.
    pub fn schedule_table(&self) -> ScheduleTable {
        self.schedule.iter().cloned().collect()
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if s.steps_per_day == 0 || 1440 % s.steps_per_day != 0 {
            errors.push(ConfigError::new(
                "simulation.steps_per_day",
                "must be > 0 and divide 1440",
            ));
        }
        if s.days == 0 {
            errors.push(ConfigError::new("simulation.days", "must be > 0"));
        }

        let p = &self.pricing;
        for (field, v) in [
            ("pricing.base_price", p.base_price),
            ("pricing.peak_price", p.peak_price),
            ("pricing.threshold", p.threshold),
        ] {
            if !v.is_finite() {
                errors.push(ConfigError::new(field, "must be finite"));
            }
        }
        if p.peak_start_hour > 23 || p.peak_end_hour > 24 {
            errors.push(ConfigError::new(
                "pricing.peak_start_hour",
                "peak hours must lie within the day",
            ));
        }

        let c = &self.climate;
        for (field, v) in [
            ("climate.low", c.low),
            ("climate.high", c.high),
            ("climate.mean_temp", c.mean_temp),
            ("climate.amp_temp", c.amp_temp),
            ("climate.phase_rad", c.phase_rad),
            ("climate.noise_std", c.noise_std),
        ] {
            if !v.is_finite() {
                errors.push(ConfigError::new(field, "must be finite"));
            }
        }
        if c.low > c.high {
            errors.push(ConfigError::new("climate.low", "must be <= climate.high"));
        }
        if c.noise_std < 0.0 {
            errors.push(ConfigError::new("climate.noise_std", "must be >= 0"));
        }

        let b = &self.budget;
        for (field, v) in [
            ("budget.usage_limit", b.usage_limit),
            ("budget.initial_usage", b.initial_usage),
            ("budget.usage_per_device_hour", b.usage_per_device_hour),
        ] {
            if v.is_nan() || v < 0.0 {
                errors.push(ConfigError::new(field, "must be >= 0"));
            }
        }

        let n = &self.night;
        if n.start_hour > 23 || n.end_hour > 24 {
            errors.push(ConfigError::new(
                "night.start_hour",
                "night hours must lie within the day",
            ));
        }

        let mut seen = HashSet::new();
        for (i, d) in self.devices.iter().enumerate() {
            if d.name.is_empty() {
                errors.push(ConfigError::new(format!("devices[{i}].name"), "must not be empty"));
            } else if !seen.insert(d.name.as_str()) {
                errors.push(ConfigError::new(
                    format!("devices[{i}].name"),
                    format!("duplicate device \"{}\"", d.name),
                ));
            }
            if d.priority == 0 {
                errors.push(ConfigError::new(format!("devices[{i}].priority"), "must be >= 1"));
            }
        }

        for (i, e) in self.schedule.iter().enumerate() {
            if e.device.is_empty() {
                errors.push(ConfigError::new(format!("schedule[{i}].device"), "must not be empty"));
            }
        }

        errors
    }
}
