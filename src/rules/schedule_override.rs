use chrono::NaiveDateTime;
use tracing::debug;

use crate::devices::DeviceStatusMap;
use crate::schedule::ScheduleTable;

/// Final stage: devices scheduled for the current instant are forced on.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScheduleOverride;

impl ScheduleOverride {
    /// Forces on every device whose entry matches `now` exactly, inserting
    /// unknown devices. Returns the number of entries applied.
    pub fn apply(
        &self,
        schedule: &ScheduleTable,
        now: NaiveDateTime,
        status: &mut DeviceStatusMap,
    ) -> usize {
        let mut applied = 0;
        for entry in schedule.due_at(now) {
            status.set(&entry.device, true);
            debug!(device = %entry.device, "schedule override");
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::devices::DeviceRegistry;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 16)
            .and_then(|d| d.and_hms_opt(h, 0, 0))
            .expect("valid timestamp")
    }

    #[test]
    fn overrides_off_device() {
        let registry = DeviceRegistry::new().with("Oven", 3);
        let mut status = DeviceStatusMap::initial(&registry);
        status.set("Oven", false);
        let schedule = ScheduleTable::new().with("Oven", at(18));
        assert_eq!(ScheduleOverride.apply(&schedule, at(18), &mut status), 1);
        assert_eq!(status.get("Oven"), Some(true));
    }

    #[test]
    fn inserts_unregistered_device() {
        let mut status = DeviceStatusMap::initial(&DeviceRegistry::new());
        let schedule = ScheduleTable::new().with("Sprinkler", at(6));
        ScheduleOverride.apply(&schedule, at(6), &mut status);
        assert_eq!(status.get("Sprinkler"), Some(true));
    }

    #[test]
    fn other_instants_have_no_effect() {
        let registry = DeviceRegistry::new().with("Oven", 3);
        let mut status = DeviceStatusMap::initial(&registry);
        status.set("Oven", false);
        let schedule = ScheduleTable::new().with("Oven", at(17)).with("Oven", at(19));
        assert_eq!(ScheduleOverride.apply(&schedule, at(18), &mut status), 0);
        assert_eq!(status.get("Oven"), Some(false));
    }
}
