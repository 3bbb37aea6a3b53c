//! End-to-end rule pipeline scenarios and exact boundary behavior.

mod common;

use common::{at, count_off, quiet_context, registry, run};
use home_ems::devices::{COOLING, HEATING};
use home_ems::schedule::ScheduleTable;

#[test]
fn high_price_sheds_everything_but_tier_one() {
    let reg = registry(&[("Heating", 1), ("Lights", 2), ("TV", 3)]);
    let mut ctx = quiet_context();
    ctx.current_price = 0.25;

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert!(d.energy_saving_mode);
    assert_eq!(d.device_status.get("Lights"), Some(false));
    assert_eq!(d.device_status.get("TV"), Some(false));
    assert_eq!(d.device_status.get(HEATING), Some(true));
    assert_eq!(d.total_energy_used, 25.0);
}

#[test]
fn night_keeps_only_security_and_refrigerator() {
    let reg = registry(&[("Security", 1), ("Refrigerator", 1), ("Lights", 2), ("TV", 3)]);
    let mut ctx = quiet_context();
    ctx.current_time = at(2, 0);

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert!(d.night_mode);
    assert_eq!(d.device_status.get("Security"), Some(true));
    assert_eq!(d.device_status.get("Refrigerator"), Some(true));
    assert_eq!(d.device_status.get("Lights"), Some(false));
    assert_eq!(d.device_status.get("TV"), Some(false));
}

#[test]
fn cold_room_turns_heating_on() {
    let mut ctx = quiet_context();
    ctx.current_temperature = 18.0;

    let d = run(&ctx, &registry(&[("TV", 2)]), &ScheduleTable::new());
    assert!(d.temperature_regulation_active);
    assert_eq!(d.device_status.get(HEATING), Some(true));
    assert_eq!(d.device_status.get(COOLING), Some(false));
}

#[test]
fn hot_room_turns_cooling_on() {
    let mut ctx = quiet_context();
    ctx.current_temperature = 27.5;

    let d = run(&ctx, &registry(&[("TV", 2)]), &ScheduleTable::new());
    assert!(d.temperature_regulation_active);
    assert_eq!(d.device_status.get(HEATING), Some(false));
    assert_eq!(d.device_status.get(COOLING), Some(true));
}

#[test]
fn over_budget_sheds_until_pool_is_exhausted() {
    let reg = registry(&[("D1", 1), ("D2", 2), ("D3", 2), ("D4", 2), ("D5", 2)]);
    let mut ctx = quiet_context();
    ctx.energy_usage_limit = 31.0;
    ctx.total_energy_used_today = 35.0;

    let d = run(&ctx, &reg, &ScheduleTable::new());
    let sheddable_off = ["D2", "D3", "D4", "D5"]
        .iter()
        .filter(|n| d.device_status.get(n) == Some(false))
        .count();
    assert!(sheddable_off >= 3);
    assert!(d.total_energy_used <= 31.0);
    assert_eq!(d.device_status.get("D1"), Some(true));
}

#[test]
fn schedule_beats_saving_mode() {
    let reg = registry(&[("Oven", 3)]);
    let mut ctx = quiet_context();
    ctx.current_price = 0.25;
    let schedule = ScheduleTable::new().with("Oven", ctx.current_time);

    let d = run(&ctx, &reg, &schedule);
    assert!(d.energy_saving_mode);
    assert_eq!(d.device_status.get("Oven"), Some(true));
}

#[test]
fn essential_only_budget_is_left_unmet() {
    let reg = registry(&[("Heating", 1), ("Cooling", 1)]);
    let mut ctx = quiet_context();
    ctx.current_price = 0.25;
    ctx.current_temperature = 19.0;
    ctx.energy_usage_limit = 10.0;
    ctx.total_energy_used_today = 15.0;

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert_eq!(d.device_status.get(HEATING), Some(true));
    assert_eq!(d.total_energy_used, 15.0);
    assert!(d.shed_devices.is_empty());
}

#[test]
fn price_equal_to_threshold_keeps_devices_on() {
    let reg = registry(&[("Heating", 1), ("Lights", 2)]);
    let mut ctx = quiet_context();
    ctx.current_price = 0.20;

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert!(!d.energy_saving_mode);
    assert_eq!(d.device_status.get("Lights"), Some(true));
}

#[test]
fn six_o_clock_is_day() {
    let reg = registry(&[("Security", 1), ("TV", 2)]);
    let mut ctx = quiet_context();
    ctx.current_time = at(6, 0);

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert!(!d.night_mode);
    assert_eq!(d.device_status.get("TV"), Some(true));
    assert_eq!(d.device_status.get("Security"), Some(true));
}

#[test]
fn eleven_pm_is_night() {
    let reg = registry(&[("Refrigerator", 1), ("Lights", 2)]);
    let mut ctx = quiet_context();
    ctx.current_time = at(23, 0);

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert!(d.night_mode);
    assert_eq!(d.device_status.get("Lights"), Some(false));
    assert_eq!(d.device_status.get("Refrigerator"), Some(true));
}

#[test]
fn night_turns_off_unexempt_tier_one_device() {
    let reg = registry(&[("Router", 1)]);
    let mut ctx = quiet_context();
    ctx.current_time = at(3, 0);

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert_eq!(d.device_status.get("Router"), Some(false));
}

#[test]
fn comfort_band_endpoints_are_not_regulated() {
    for temp in [20.0, 24.0] {
        let mut ctx = quiet_context();
        ctx.current_temperature = temp;
        let d = run(&ctx, &registry(&[("TV", 2)]), &ScheduleTable::new());
        assert!(!d.temperature_regulation_active, "temp {temp}");
        assert_eq!(d.device_status.get(HEATING), Some(false));
        assert_eq!(d.device_status.get(COOLING), Some(false));
    }
}

#[test]
fn cooling_key_is_always_present() {
    let d = run(&quiet_context(), &registry(&[("TV", 2)]), &ScheduleTable::new());
    assert_eq!(d.device_status.get(COOLING), Some(false));
    assert_eq!(d.device_status.len(), 3);
}

#[test]
fn usage_exactly_at_budget_sheds() {
    let reg = registry(&[("Essential", 1), ("Light", 2), ("TV", 2)]);
    let mut ctx = quiet_context();
    ctx.energy_usage_limit = 30.0;
    ctx.total_energy_used_today = 30.0;

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert!(d.total_energy_used < 30.0);
    assert_eq!(d.shed_devices, vec!["Light"]);
}

#[test]
fn priority_two_devices_are_eligible_for_shedding() {
    let reg = registry(&[("Essential", 1), ("MediumPriority", 2), ("Low", 3)]);
    let mut ctx = quiet_context();
    ctx.energy_usage_limit = 20.0;
    ctx.total_energy_used_today = 30.0;

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert_eq!(d.device_status.get("MediumPriority"), Some(false));
    assert_eq!(d.device_status.get("Low"), Some(false));
    assert_eq!(d.device_status.get("Essential"), Some(true));
    assert_eq!(d.total_energy_used, 28.0);
}

#[test]
fn shedding_decrements_by_one_unit_per_device() {
    let reg = registry(&[("D1", 1), ("D2", 2), ("D3", 2)]);
    let mut ctx = quiet_context();
    ctx.energy_usage_limit = 28.0;
    ctx.total_energy_used_today = 30.0;

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert_eq!(d.total_energy_used, 28.0);
    assert_eq!(d.shed_devices.len(), 2);
}

#[test]
fn shedding_stops_as_soon_as_usage_is_below_budget() {
    let reg = registry(&[("D1", 1), ("D2", 2), ("D3", 2), ("D4", 2), ("D5", 3)]);
    let mut ctx = quiet_context();
    ctx.energy_usage_limit = 30.0;
    ctx.total_energy_used_today = 32.0;

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert_eq!(d.total_energy_used, 29.0);
    assert_eq!(d.device_status.get("D5"), Some(true));
    assert_eq!(count_off(&d), 3 + 2);
}

#[test]
fn saving_mode_then_budget_has_nothing_to_shed() {
    let reg = registry(&[("Device1", 1)]);
    let mut ctx = quiet_context();
    ctx.current_price = 0.25;
    ctx.energy_usage_limit = 10.0;
    ctx.total_energy_used_today = 15.0;

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert_eq!(d.device_status.get("Device1"), Some(true));
    assert_eq!(d.total_energy_used, 15.0);
}

#[test]
fn budget_loop_skips_devices_already_off_from_price_rule() {
    let reg = registry(&[("A", 2), ("B", 2)]);
    let mut ctx = quiet_context();
    ctx.current_price = 0.25;
    ctx.energy_usage_limit = 5.0;
    ctx.total_energy_used_today = 8.0;

    let d = run(&ctx, &reg, &ScheduleTable::new());
    assert!(d.shed_devices.is_empty());
    assert_eq!(d.total_energy_used, 8.0);
}

#[test]
fn schedule_inserts_unknown_device_and_ignores_other_minutes() {
    let reg = registry(&[("TV", 2)]);
    let ctx = quiet_context();
    let schedule = ScheduleTable::new()
        .with("Sprinkler", at(14, 0))
        .with("Dishwasher", at(14, 1));

    let d = run(&ctx, &reg, &schedule);
    assert_eq!(d.device_status.get("Sprinkler"), Some(true));
    assert_eq!(d.device_status.get("Dishwasher"), None);
}

#[test]
fn schedule_beats_night_mode() {
    let reg = registry(&[("Heater", 2)]);
    let mut ctx = quiet_context();
    ctx.current_time = at(1, 30);
    let schedule = ScheduleTable::new().with("Heater", at(1, 30));

    let d = run(&ctx, &reg, &schedule);
    assert!(d.night_mode);
    assert_eq!(d.device_status.get("Heater"), Some(true));
}

#[test]
fn status_map_follows_registration_order() {
    let reg = registry(&[("Zeta", 2), ("Alpha", 1), ("Mid", 3)]);
    let d = run(&quiet_context(), &reg, &ScheduleTable::new());
    let names: Vec<&str> = d.device_status.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid", HEATING, COOLING]);
}

#[test]
fn repeated_names_from_json_yield_one_status_key() {
    let reg: home_ems::devices::DeviceRegistry = serde_json::from_str(
        r#"[{"name":"Lights","priority":2},{"name":"Lights","priority":3}]"#,
    )
    .expect("registry should parse");
    let mut ctx = quiet_context();
    ctx.current_price = 0.25;

    let d = run(&ctx, &reg, &ScheduleTable::new());
    let pairs: Vec<(&str, bool)> = d.device_status.iter().collect();
    assert_eq!(
        pairs,
        vec![("Lights", false), (HEATING, false), (COOLING, false)]
    );
}
