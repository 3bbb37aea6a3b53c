//! CSV export for runner step results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::StepResult;

/// Schema v1 column header for CSV telemetry export.
pub const HEADER: &str = "timestep,time,price,temperature,saving_mode,night_mode,\
                          regulation_active,heating,cooling,devices_on,devices_shed,\
                          usage_before,usage_after,budget_met";

/// Exports step results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step using the schema v1
/// column layout. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[StepResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes step results as CSV to any writer.
///
/// Shed devices are joined with `;` in shed order.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[StepResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in results {
        wtr.write_record(&[
            r.timestep.to_string(),
            r.time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            format!("{:.4}", r.price),
            format!("{:.2}", r.temperature),
            r.saving_mode.to_string(),
            r.night_mode.to_string(),
            r.regulation_active.to_string(),
            r.heating.to_string(),
            r.cooling.to_string(),
            r.devices_on.to_string(),
            r.shed_devices.join(";"),
            format!("{:.2}", r.usage_before),
            format!("{:.2}", r.usage_after),
            r.budget_met.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
