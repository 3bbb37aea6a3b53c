//! Night-mode rule: a wrap-around clock window with a name-based exemption.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::devices::{DeviceRegistry, DeviceStatusMap};

/// Devices kept on through the night unless configured otherwise.
pub const DEFAULT_NIGHT_EXEMPT: [&str; 2] = ["Security", "Refrigerator"];

/// Night window and the devices exempt from it.
///
/// The window is `[start_hour, end_hour)` and wraps past midnight when
/// `start_hour > end_hour`. Exemption is by exact device name, not priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NightPolicy {
    /// First night hour (inclusive).
    pub start_hour: u32,
    /// First day hour (exclusive end of the window).
    pub end_hour: u32,
    /// Device names forced on during the night.
    pub exempt: Vec<String>,
}

impl Default for NightPolicy {
    fn default() -> Self {
        Self {
            start_hour: 23,
            end_hour: 6,
            exempt: DEFAULT_NIGHT_EXEMPT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl NightPolicy {
    /// Returns `true` if `hour` falls inside the night window.
    pub fn is_night_hour(&self, hour: u32) -> bool {
        if self.start_hour > self.end_hour {
            hour >= self.start_hour || hour < self.end_hour
        } else {
            hour >= self.start_hour && hour < self.end_hour
        }
    }

    pub fn is_night(&self, time: NaiveDateTime) -> bool {
        self.is_night_hour(time.hour())
    }

    pub fn is_exempt(&self, name: &str) -> bool {
        self.exempt.iter().any(|e| e == name)
    }

    /// Forces registry devices off (exempt ones on) during the night window.
    ///
    /// Devices outside the registry, including the synthetic climate
    /// actuators, are not touched. Returns whether night mode is active.
    pub fn apply(
        &self,
        time: NaiveDateTime,
        registry: &DeviceRegistry,
        status: &mut DeviceStatusMap,
    ) -> bool {
        if !self.is_night(time) {
            return false;
        }
        for name in registry.names() {
            status.set(name, self.is_exempt(name));
        }
        debug!(hour = time.hour(), "night mode active");
        true
    }
}
