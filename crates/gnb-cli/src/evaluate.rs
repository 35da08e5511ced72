//! CLI helpers for running a resampling evaluation over a CSV dataset.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gnb_classifiers::config::ResampleConfig;
use gnb_classifiers::io::{read_dataset_csv, write_decision_surface_csv};
use gnb_classifiers::models::factory;
use gnb_classifiers::report::{decision_surface, DEFAULT_GRID_STEP};
use gnb_classifiers::resampler::{ResampleSummary, Resampler};

/// Everything a `gnb run` invocation needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub label_column: String,
    pub resample: ResampleConfig,
    /// Where to write the two-feature decision grid, if anywhere.
    pub surface_out: Option<PathBuf>,
    pub surface_step: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            label_column: "label".to_string(),
            resample: ResampleConfig::default(),
            surface_out: None,
            surface_step: DEFAULT_GRID_STEP,
        }
    }
}

/// Load a run configuration from a JSON file.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: RunConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Read the dataset, run every realization and optionally export the
/// decision surface.
pub fn run_evaluation<P: AsRef<Path>>(data_path: P, config: &RunConfig) -> Result<ResampleSummary> {
    let dataset = read_dataset_csv(&data_path, &config.label_column)?;
    let estimator = factory::build_model(&config.resample.model);

    let summary = Resampler::new(config.resample.clone())
        .run(&estimator, &dataset)
        .context("Resampling evaluation failed")?;

    if let Some(out) = &config.surface_out {
        let surface = decision_surface(&estimator, &dataset, config.surface_step)
            .context("Failed to compute decision surface")?;
        write_decision_surface_csv(&surface, out)?;
        log::info!(
            "Wrote {} x {} decision surface to {}",
            surface.xs.len(),
            surface.ys.len(),
            out.display()
        );
    }

    Ok(summary)
}
