//! Simulation driver
//!
//! Usage: `simulate [traders] [transactions] [instruments]`
//!
//! `SIM_CONFIG` names a JSON config file; `SIM_TRADERS`, `SIM_TRANSACTIONS`,
//! `SIM_INSTRUMENTS` and `SIM_SEED` override it; positional arguments override
//! both. `SIM_EXPORT` writes the JSON report to the given path.

use anyhow::Context;
use simulation::config::SimConfig;
use simulation::export::{build_export, write_to_file};
use simulation::reports::{render_books, StepPrinter};
use simulation::Simulation;

fn load_config() -> anyhow::Result<SimConfig> {
    let config = match std::env::var("SIM_CONFIG") {
        Ok(path) => SimConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        Err(_) => SimConfig::default(),
    };

    Ok(config
        .apply_env()?
        .with_args(std::env::args().skip(1))?)
}

fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = load_config()?;
    let print_every_step = config.print_every_step;
    let mut simulation = Simulation::new(config)?;

    let report = if print_every_step {
        let mut printer = StepPrinter::new(std::io::stdout().lock());
        let report = simulation.run_with(&mut printer)?;
        printer.finish().context("writing step output")?;
        report
    } else {
        simulation.run()?
    };

    print!("{}", render_books(simulation.universe()));
    println!("{}", report.metrics.summary());
    println!("Trade digest: {}", report.trade_digest);

    if let Ok(path) = std::env::var("SIM_EXPORT") {
        let export = build_export(&report, simulation.universe());
        write_to_file(&export, &path).with_context(|| format!("writing export to {path}"))?;
        tracing::info!(path = %path, "Wrote export");
    }

    Ok(())
}
