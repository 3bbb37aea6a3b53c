use tracing::debug;

use crate::devices::{DeviceRegistry, DeviceStatusMap};

/// Energy-saving mode triggered by an elevated price signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriceRule;

impl PriceRule {
    /// Saving mode is on only when the price is strictly above the threshold.
    pub fn is_saving_mode(current_price: f64, price_threshold: f64) -> bool {
        current_price > price_threshold
    }

    /// Turns off every sheddable registry device while saving mode is on.
    ///
    /// Returns whether saving mode is active. Essential devices are left as
    /// they are.
    pub fn apply(
        &self,
        current_price: f64,
        price_threshold: f64,
        registry: &DeviceRegistry,
        status: &mut DeviceStatusMap,
    ) -> bool {
        let saving_mode = Self::is_saving_mode(current_price, price_threshold);
        if saving_mode {
            for entry in registry.iter().filter(|e| e.is_sheddable()) {
                status.set(&entry.name, false);
            }
            debug!(current_price, price_threshold, "saving mode active");
        }
        saving_mode
    }
}
