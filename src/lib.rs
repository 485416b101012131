mod cli;
pub mod config;
pub mod ingest;
pub mod pipeline;
pub mod report;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use pipeline::Session;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fit(args) => handle_fit(config::RunConfig::from_fit_args(args)),
        Commands::Predict(args) => handle_predict(config::RunConfig::from_predict_args(args)),
    }
}

fn handle_fit(config: config::RunConfig) -> Result<()> {
    config.validate()?;

    println!("--> Configuration\n{}", config.summary());

    if config.dry_run {
        println!("\nDry run requested: skipping model fitting.");
        return Ok(());
    }

    let table = ingest::read_table(&config.dataset)?;

    let mut session = Session::new();
    let metrics = session
        .train(&table, config.target.as_deref())
        .with_context(|| format!("failed to fit model on {}", config.dataset.display()))?;

    let model = session.model().expect("model present after successful train");
    let report = report::FitReport::new(model, &metrics);
    println!("\n--> Report\n{}", report.render());

    if let Some(path) = &config.output {
        report.persist(path)?;
        println!("\nReport written to {}", path.display());
    }

    Ok(())
}

fn handle_predict(config: config::RunConfig) -> Result<()> {
    config.validate()?;

    println!("--> Configuration\n{}", config.summary());

    let table = ingest::read_table(&config.dataset)?;

    let mut session = Session::new();
    session
        .train(&table, config.target.as_deref())
        .with_context(|| format!("failed to fit model on {}", config.dataset.display()))?;

    let inputs: Vec<ingest::CellValue> = config
        .inputs
        .iter()
        .map(|raw| ingest::CellValue::from_field(raw))
        .collect();

    let prediction = session.predict(&inputs)?;
    let target = &session
        .model()
        .expect("model present after successful train")
        .target;

    println!(
        "\n--> Prediction\n{}",
        report::render_prediction(&prediction, target)
    );

    Ok(())
}
