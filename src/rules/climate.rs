use tracing::debug;

use crate::devices::{COOLING, DeviceStatusMap, HEATING};

/// Drives the two climate actuators from the comfort band.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClimateRule;

impl ClimateRule {
    /// Regulation is needed only strictly outside `[low, high]`.
    pub fn needs_regulation(current_temperature: f64, (low, high): (f64, f64)) -> bool {
        current_temperature < low || current_temperature > high
    }

    /// Heats below the band, cools above it, leaves both actuators alone
    /// inside it. Returns whether regulation is active.
    pub fn apply(
        &self,
        current_temperature: f64,
        range: (f64, f64),
        status: &mut DeviceStatusMap,
    ) -> bool {
        let (low, high) = range;
        if current_temperature < low {
            status.set(HEATING, true);
            status.set(COOLING, false);
        } else if current_temperature > high {
            status.set(HEATING, false);
            status.set(COOLING, true);
        }
        let active = Self::needs_regulation(current_temperature, range);
        if active {
            debug!(current_temperature, low, high, "temperature regulation active");
        }
        active
    }
}
