//! Budget-enforcement loop: sheds sheddable devices until usage is strictly
//! below the budget or nothing eligible is left.

use tracing::{debug, warn};

use crate::devices::{DeviceRegistry, DeviceStatusMap};

/// Units of usage credited back for each device turned off.
pub const SHED_UNIT: f64 = 1.0;

/// Result of one run of the budget loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ShedOutcome {
    /// Usage after shedding (never above the input usage).
    pub usage: f64,
    /// Devices turned off, in shed order.
    pub shed: Vec<String>,
}

impl ShedOutcome {
    /// Returns `true` if usage ended strictly below `budget`.
    pub fn budget_met(&self, budget: f64) -> bool {
        self.usage < budget
    }
}

/// Stateless budget enforcer.
#[derive(Debug, Default, Clone, Copy)]
pub struct BudgetEnforcer;

impl BudgetEnforcer {
    /// Sheds devices in registration order while `usage >= budget`.
    ///
    /// Each pass scans the registry once. An on device with priority > 1 is
    /// turned off and usage drops by [`SHED_UNIT`]; the pass stops as soon as
    /// usage is strictly below `budget`. A pass that sheds nothing ends the
    /// loop, leaving the budget unmet. At most one pass per sheddable device
    /// plus one can run.
    pub fn apply(
        &self,
        registry: &DeviceRegistry,
        status: &mut DeviceStatusMap,
        mut usage: f64,
        budget: f64,
    ) -> ShedOutcome {
        let mut shed = Vec::new();

        while usage >= budget {
            let mut shed_any = false;
            for entry in registry.iter() {
                if status.is_on(&entry.name) && entry.is_sheddable() {
                    status.set(&entry.name, false);
                    usage -= SHED_UNIT;
                    shed_any = true;
                    shed.push(entry.name.clone());
                    debug!(device = %entry.name, usage, budget, "shed device");
                    if usage < budget {
                        break;
                    }
                }
            }
            if !shed_any {
                warn!(usage, budget, "budget unmet, no sheddable device left on");
                break;
            }
        }

        ShedOutcome { usage, shed }
    }
}
