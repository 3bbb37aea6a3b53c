//! Post-hoc KPI computation from runner results.

use std::fmt;

use serde::Serialize;

use super::types::StepResult;

/// Aggregate indicators derived from a complete run.
///
/// Computed post-hoc from `Vec<StepResult>` to ensure consistency between
/// step data and reported metrics.
#[derive(Debug, Clone, Serialize)]
pub struct KpiReport {
    /// Number of ticks evaluated.
    pub steps: usize,
    /// Ticks spent in energy-saving mode.
    pub saving_mode_steps: usize,
    /// Ticks inside the night window.
    pub night_mode_steps: usize,
    /// Ticks with active temperature regulation.
    pub regulation_steps: usize,
    /// Total devices shed by the budget loop across the run.
    pub devices_shed: usize,
    /// Ticks that ended with usage at or above the budget.
    pub budget_violation_steps: usize,
    /// Mean number of devices left on per tick.
    pub mean_devices_on: f64,
    /// Highest usage passed in to any evaluation.
    pub peak_usage: f64,
    /// Usage persisted after the last tick.
    pub final_usage: f64,
}

impl KpiReport {
    /// Computes all KPIs from the complete step record vector.
    pub fn from_results(results: &[StepResult]) -> Self {
        if results.is_empty() {
            return Self {
                steps: 0,
                saving_mode_steps: 0,
                night_mode_steps: 0,
                regulation_steps: 0,
                devices_shed: 0,
                budget_violation_steps: 0,
                mean_devices_on: 0.0,
                peak_usage: 0.0,
                final_usage: 0.0,
            };
        }

        let mut saving = 0_usize;
        let mut night = 0_usize;
        let mut regulation = 0_usize;
        let mut shed = 0_usize;
        let mut violations = 0_usize;
        let mut on_sum = 0_usize;
        let mut peak_usage = 0.0_f64;

        for r in results {
            saving += usize::from(r.saving_mode);
            night += usize::from(r.night_mode);
            regulation += usize::from(r.regulation_active);
            shed += r.shed_devices.len();
            if !r.budget_met {
                violations += 1;
            }
            on_sum += r.devices_on;
            peak_usage = peak_usage.max(r.usage_before);
        }

        Self {
            steps: results.len(),
            saving_mode_steps: saving,
            night_mode_steps: night,
            regulation_steps: regulation,
            devices_shed: shed,
            budget_violation_steps: violations,
            mean_devices_on: on_sum as f64 / results.len() as f64,
            peak_usage,
            final_usage: results
                .last()
                .map_or(0.0, |r| r.usage_persisted),
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Steps evaluated:       {}", self.steps)?;
        writeln!(f, "Saving-mode steps:     {}", self.saving_mode_steps)?;
        writeln!(f, "Night-mode steps:      {}", self.night_mode_steps)?;
        writeln!(f, "Regulation steps:      {}", self.regulation_steps)?;
        writeln!(f, "Devices shed:          {}", self.devices_shed)?;
        writeln!(f, "Budget violations:     {}", self.budget_violation_steps)?;
        writeln!(f, "Mean devices on:       {:.2}", self.mean_devices_on)?;
        writeln!(f, "Peak usage:            {:.2}", self.peak_usage)?;
        write!(f, "Final usage:           {:.2}", self.final_usage)
    }
}
