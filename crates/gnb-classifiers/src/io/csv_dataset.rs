//! Delimited-text reader for labelled numeric datasets and a writer for
//! decision-surface grids.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::data_handling::Dataset;
use crate::math::{Array1, Array2};
use crate::report::DecisionSurface;

/// Configuration for reading a dataset file.
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// Column name holding integer class labels.
    pub label_column: String,
    pub delimiter: u8,
    /// Columns skipped when collecting features (e.g. row ids).
    pub ignore_columns: Vec<String>,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            label_column: "label".to_string(),
            delimiter: b',',
            ignore_columns: Vec::new(),
        }
    }
}

/// Read a comma separated file with a header row. Every column other than
/// the label column is parsed as an `f64` feature.
pub fn read_dataset_csv<P: AsRef<Path>>(path: P, label_column: &str) -> Result<Dataset> {
    let config = CsvReaderConfig {
        label_column: label_column.to_string(),
        ..CsvReaderConfig::default()
    };
    read_dataset_csv_with_config(path, &config)
}

pub fn read_dataset_csv_with_config<P: AsRef<Path>>(
    path: P,
    config: &CsvReaderConfig,
) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(&path)
        .with_context(|| format!("Failed to open dataset: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read dataset header row")?
        .clone();

    let label_idx = find_column(&headers, &config.label_column)
        .ok_or_else(|| anyhow!("Missing label column '{}'", config.label_column))?;

    let feature_indices: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|&(idx, name)| {
            idx != label_idx
                && !config
                    .ignore_columns
                    .iter()
                    .any(|ignored| ignored.eq_ignore_ascii_case(name))
        })
        .map(|(idx, _)| idx)
        .collect();
    if feature_indices.is_empty() {
        return Err(anyhow!("No feature columns found in dataset header"));
    }

    let mut features = Vec::new();
    let mut labels = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let label = record
            .get(label_idx)
            .ok_or_else(|| anyhow!("Missing label value at row {}", row_idx + 1))?
            .parse::<i32>()
            .with_context(|| format!("Invalid label at row {}", row_idx + 1))?;
        labels.push(label);

        for &idx in &feature_indices {
            let value = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing feature value at row {}", row_idx + 1))?;
            let parsed = value.parse::<f64>().with_context(|| {
                format!(
                    "Invalid feature '{}' at row {}",
                    headers.get(idx).unwrap_or(""),
                    row_idx + 1
                )
            })?;
            features.push(parsed);
        }
    }

    let x = Array2::from_shape_vec((labels.len(), feature_indices.len()), features)
        .context("Failed to build feature matrix")?;
    let dataset = Dataset::new(x, Array1::from_vec(labels))?;

    log::debug!(
        "Read {} samples with features {:?} from {}",
        dataset.n_samples(),
        feature_indices
            .iter()
            .map(|&idx| headers.get(idx).unwrap_or(""))
            .collect::<Vec<_>>(),
        path.as_ref().display()
    );

    Ok(dataset)
}

/// Write a decision surface as `x,y,label` rows.
pub fn write_decision_surface_csv<P: AsRef<Path>>(surface: &DecisionSurface, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;

    writer.write_record(["x", "y", "label"])?;
    for (x, y, label) in surface.points() {
        writer.write_record(&[x.to_string(), y.to_string(), label.to_string()])?;
    }
    writer.flush()?;

    Ok(())
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}
