//! Occupancy Model Command Line
//!
//! Configuration loading, logging setup and the `train`/`predict` workflows
//! behind the `occupancy-model` binary.

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, Map};
use data_validator::TimeOfWeek;
use feature_engine::DegeneratePolicy;
use inference_engine::{Evaluation, FittedPipeline, PipelineConfig, Prediction, TrainingPipeline};
use occupancy_log::LogLoader;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use trainer::{LossRecord, TrainerConfig};

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "OCCUPANCY";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory of `YYYY-MM-DD.txt` day logs
    pub log_dir: PathBuf,
    /// Maximum log level
    pub log_level: String,
    pub trainer: TrainerConfig,
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("occupancy_logs"),
            log_level: "info".to_string(),
            trainer: TrainerConfig::default(),
            degenerate_policy: DegeneratePolicy::default(),
        }
    }
}

impl AppConfig {
    /// Pipeline settings derived from this configuration
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            trainer: self.trainer.clone(),
            degenerate_policy: self.degenerate_policy,
        }
    }

    /// Apply command-line overrides, which take precedence over every other layer
    pub fn with_overrides(mut self, log_dir: Option<PathBuf>, epochs: Option<usize>) -> Self {
        if let Some(log_dir) = log_dir {
            self.log_dir = log_dir;
        }
        if let Some(epochs) = epochs {
            self.trainer.epochs = epochs;
        }
        self
    }
}

/// Load configuration from an optional TOML file, then `OCCUPANCY__*` variables
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    load_config_from(path, None)
}

/// Like [`load_config`], reading variables from `env` instead of the process
/// environment when given
pub fn load_config_from(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<AppConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(false));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("Failed to read configuration")?;

    config
        .try_deserialize()
        .context("Invalid configuration")
}

/// Initialize logging
pub fn init_logging(level: &str, json: bool) -> Result<()> {
    let level: Level = level
        .parse()
        .with_context(|| format!("Unknown log level {:?}", level))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.context("Failed to set tracing subscriber")
}

/// Summary of a training run, printable as JSON
#[derive(Debug, Clone, Serialize)]
pub struct TrainSummary {
    pub files_read: usize,
    pub files_skipped: usize,
    pub lines_skipped: usize,
    pub missing_readings: usize,
    pub epochs_run: usize,
    pub stopped_early: bool,
    pub equation: String,
    pub loss_history: Vec<LossRecord>,
    pub evaluation: Evaluation,
}

/// Fitted pipeline plus its summary
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub fitted: FittedPipeline,
    pub summary: TrainSummary,
}

/// Load the day logs and fit a model on every observation
pub fn run_train(config: &AppConfig) -> Result<TrainingRun> {
    let report = LogLoader::new()
        .load_dir(&config.log_dir)
        .with_context(|| format!("Failed to load logs from {}", config.log_dir.display()))?;

    if report.observations.is_empty() {
        bail!(
            "No usable observations in {} ({} files skipped, {} lines skipped)",
            config.log_dir.display(),
            report.files_skipped,
            report.lines_skipped
        );
    }

    let pipeline = TrainingPipeline::new(config.pipeline())?;
    let fitted = pipeline.run(&report.observations)?;
    let evaluation = Evaluation::compute(&fitted.predictor, &report.observations)?;
    info!(
        "In-sample fit: rmse={:.3}, mae={:.3}, r2={:.4}",
        evaluation.rmse, evaluation.mae, evaluation.r_squared
    );

    let summary = TrainSummary {
        files_read: report.files_read,
        files_skipped: report.files_skipped,
        lines_skipped: report.lines_skipped,
        missing_readings: report.missing_readings,
        epochs_run: fitted.outcome.epochs_run,
        stopped_early: fitted.outcome.stopped_early,
        equation: fitted.predictor.equation(),
        loss_history: fitted.outcome.loss_history.clone(),
        evaluation,
    };

    Ok(TrainingRun { fitted, summary })
}

/// Validate one textual query, train on the day logs, then answer it
pub fn run_predict(config: &AppConfig, dow: &str, hour: &str, minute: &str) -> Result<Prediction> {
    let time = TimeOfWeek::parse_fields(dow, hour, minute)
        .with_context(|| format!("Invalid query: dow={:?} hour={:?} minute={:?}", dow, hour, minute))?;
    let run = run_train(config)?;
    Ok(run.fitted.predictor.predict(time))
}
