//! Occupancy Model - Main Entry Point

use anyhow::Result;
use clap::{Parser, Subcommand};
use occupancy_cli::{init_logging, load_config, run_predict, run_train};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "occupancy-model")]
#[command(about = "Predict weekly occupancy from time of week")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, default_value = "occupancy.toml")]
    config: PathBuf,

    /// Directory of YYYY-MM-DD.txt day logs (overrides config)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Training epochs (overrides config)
    #[arg(long, global = true)]
    epochs: Option<usize>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a model on the day logs and report the equation and fit
    Train {
        /// Print the training summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fit a model, then predict occupancy for one time of week
    Predict {
        /// Day of week (1 = Monday .. 7 = Sunday)
        dow: String,
        /// Hour (0-23)
        hour: String,
        /// Minute (0-59)
        minute: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(Some(&cli.config))?.with_overrides(cli.log_dir, cli.epochs);

    init_logging(&config.log_level, cli.json_logs)?;
    info!("=== Occupancy Model v{} ===", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Train { json } => {
            let run = run_train(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&run.summary)?);
            } else {
                let summary = &run.summary;
                println!("{}", summary.equation);
                println!(
                    "Observations: {} ({} files, {} skipped lines, {} missing readings)",
                    summary.evaluation.n_samples,
                    summary.files_read,
                    summary.lines_skipped,
                    summary.missing_readings
                );
                println!(
                    "MSE: {:.4}  RMSE: {:.4}  MAE: {:.4}  R²: {:.4}",
                    summary.evaluation.mse,
                    summary.evaluation.rmse,
                    summary.evaluation.mae,
                    summary.evaluation.r_squared
                );
            }
        }
        Commands::Predict { dow, hour, minute } => {
            let prediction = run_predict(&config, &dow, &hour, &minute)?;
            println!("{}", prediction);
        }
    }

    Ok(())
}
