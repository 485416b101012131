use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for pricecast.
#[derive(Parser, Debug)]
#[command(
    name = "pricecast",
    version,
    about = "Fit an auto-targeted regression over a CSV dataset and predict from it"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit a model against a CSV dataset and report fit quality.
    Fit(FitArgs),
    /// Fit a model, then predict the target for a new input vector.
    Predict(PredictArgs),
}

#[derive(Args, Debug)]
pub struct FitArgs {
    /// Path to the CSV dataset.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Target column to predict; auto-detected from the header when omitted.
    #[arg(short, long, value_name = "COLUMN")]
    pub target: Option<String>,

    /// Write the fit report to this location in addition to stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Preview configuration without reading the dataset.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Path to the CSV dataset to fit against.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Comma-separated feature values, in the model's feature order.
    #[arg(short, long, value_name = "VALUES", value_delimiter = ',', num_args = 1..)]
    pub input: Vec<String>,

    /// Target column to predict; auto-detected from the header when omitted.
    #[arg(short, long, value_name = "COLUMN")]
    pub target: Option<String>,
}
