//! Integration tests for configuration types and the CSV reader/writer.

use std::io::Write;

use gnb_classifiers::config::{ModelConfig, ResampleConfig, ZeroVariancePolicy, DEFAULT_MIN_STD};
use gnb_classifiers::io::{read_dataset_csv, read_dataset_csv_with_config, write_decision_surface_csv, CsvReaderConfig};
use gnb_classifiers::models::GaussianNb;
use gnb_classifiers::report::decision_surface;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn resample_config_defaults() {
    let cfg = ResampleConfig::default();
    assert_eq!(cfg.repetitions, 20);
    assert!((cfg.test_fraction - 0.2).abs() < 1e-12);
    assert_eq!(cfg.model.zero_variance, ZeroVariancePolicy::Exact);
}

#[test]
fn policy_from_str() {
    assert_eq!("exact".parse::<ZeroVariancePolicy>().unwrap(), ZeroVariancePolicy::Exact);
    assert_eq!("REJECT".parse::<ZeroVariancePolicy>().unwrap(), ZeroVariancePolicy::Reject);
    assert_eq!(
        "epsilon".parse::<ZeroVariancePolicy>().unwrap(),
        ZeroVariancePolicy::Epsilon { min_std: DEFAULT_MIN_STD }
    );
    assert!("laplace".parse::<ZeroVariancePolicy>().is_err());
}

#[test]
fn config_round_trips_json() {
    let cfg = ResampleConfig::new(
        5,
        0.3,
        ModelConfig::new(ZeroVariancePolicy::Epsilon { min_std: 1e-4 }),
    );
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("repetitions"));
    assert!(json.contains("min_std"));
    let back: ResampleConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, back);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg: ResampleConfig = serde_json::from_str(r#"{"repetitions": 3}"#).unwrap();
    assert_eq!(cfg.repetitions, 3);
    assert!((cfg.test_fraction - 0.2).abs() < 1e-12);

    let cfg: ResampleConfig =
        serde_json::from_str(r#"{"model": {"zero_variance": "reject"}}"#).unwrap();
    assert_eq!(cfg.model.zero_variance, ZeroVariancePolicy::Reject);
}

// ---------------------------------------------------------------------------
// CSV dataset reader
// ---------------------------------------------------------------------------

#[test]
fn reads_features_and_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "data.csv",
        "sepal_length,sepal_width,label\n5.1,3.5,0\n7.0,3.2,1\n6.3,3.3,2\n",
    );
    let ds = read_dataset_csv(&path, "label").unwrap();
    assert_eq!(ds.n_samples(), 3);
    assert_eq!(ds.n_features(), 2);
    assert_eq!(ds.y().to_vec(), vec![0, 1, 2]);
    assert!((ds.x()[(1, 0)] - 7.0).abs() < 1e-12);
}

#[test]
fn label_column_can_be_anywhere() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "data.tsv", "id\tclass\tf1\n1\t4\t0.5\n2\t5\t0.7\n");
    let config = CsvReaderConfig {
        label_column: "class".to_string(),
        delimiter: b'\t',
        ignore_columns: vec!["id".to_string()],
    };
    let ds = read_dataset_csv_with_config(&path, &config).unwrap();
    assert_eq!(ds.n_features(), 1);
    assert_eq!(ds.classes(), vec![4, 5]);
}

#[test]
fn missing_label_column_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "data.csv", "a,b\n1,2\n");
    let err = read_dataset_csv(&path, "label").unwrap_err();
    assert!(err.to_string().contains("label"));
}

#[test]
fn bad_feature_value_reports_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "data.csv", "a,label\n1.0,0\nabc,1\n");
    let err = read_dataset_csv(&path, "label").unwrap_err();
    assert!(format!("{:#}", err).contains("row 2"));
}

#[test]
fn missing_file_errors() {
    assert!(read_dataset_csv("/nonexistent/path/data.csv", "label").is_err());
}

// ---------------------------------------------------------------------------
// Decision surface export
// ---------------------------------------------------------------------------

#[test]
fn decision_surface_round_trips_through_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "data.csv",
        "f1,f2,f3,label\n0.0,0.0,9.0,0\n0.2,0.1,8.0,0\n3.0,3.0,1.0,1\n3.1,2.8,2.0,1\n",
    );
    let ds = read_dataset_csv(&path, "label").unwrap();
    let surface = decision_surface(&GaussianNb::default(), &ds, 0.5).unwrap();

    // x: -1.0 .. 4.1 step 0.5, y: -1.0 .. 4.0 step 0.5
    assert_eq!(surface.xs.len(), 11);
    assert_eq!(surface.ys.len(), 10);
    assert_eq!(surface.labels.shape(), (10, 11));

    let out = dir.path().join("grid.csv");
    write_decision_surface_csv(&surface, &out).unwrap();
    let content = std::fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("x,y,label"));
    assert_eq!(lines.count(), 110);
}

#[test]
fn decision_surface_needs_two_features() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "data.csv", "f1,label\n0.0,0\n1.0,1\n");
    let ds = read_dataset_csv(&path, "label").unwrap();
    assert!(decision_surface(&GaussianNb::default(), &ds, 0.02).is_err());
}
