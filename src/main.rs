//! Simulator entry point: CLI wiring and config-driven runner construction.

mod cli;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use home_ems::config::ScenarioConfig;
use home_ems::io::export::export_csv;
use home_ems::sim::engine::Engine;
use home_ems::sim::kpi::KpiReport;

fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();
    debug!("started with verbosity level {}", cli.verbose);
}

fn load_scenario(cli: &Cli) -> anyhow::Result<ScenarioConfig> {
    // --scenario takes priority, then --preset, then baseline default
    let mut scenario = match cli.scenario {
        Some(ref path) => ScenarioConfig::from_toml_file(path)?,
        None => ScenarioConfig::from_preset(cli.preset_or_default())?,
    };

    if let Some(seed) = cli.seed {
        scenario.simulation.seed = seed;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("scenario has {} invalid field(s)", errors.len());
    }
    Ok(scenario)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let scenario = load_scenario(&cli)?;
    info!(
        devices = scenario.devices.len(),
        schedule = scenario.schedule.len(),
        days = scenario.simulation.days,
        "scenario loaded"
    );

    let mut engine = Engine::from_scenario(&scenario);
    let results = engine.run().context("rule engine rejected a tick")?;
    let kpi = KpiReport::from_results(&results);

    for r in &results {
        println!("{r}");
    }
    println!("\n{kpi}");

    if let Some(ref path) = cli.telemetry_out {
        export_csv(&results, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), "telemetry written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(home_ems::api::AppState {
            manager: home_ems::EnergyManager::new(scenario.night.clone()),
            config: engine.config().clone(),
            kpi,
            results,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(home_ems::api::serve(state, addr))
            .context("API server failed")?;
    }

    Ok(())
}
