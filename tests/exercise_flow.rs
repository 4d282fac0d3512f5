use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use rusty_folds::data::loader::load_file;
use rusty_folds::error::{CvError, MetricError};
use rusty_folds::metrics::{make_scorer, Metric, Scorer};
use rusty_folds::model_selection::{cross_val_score, cross_validate, CvStrategy, ErrorScore};
use rusty_folds::{exercise, DecisionTreeClassifier, ExperimentConfig, StratifiedKFold};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/blood_transfusion_sample.csv")
}

fn blood() -> rusty_folds::Dataset {
    load_file(&fixture())
        .unwrap()
        .split_target("Class")
        .unwrap()
}

#[test]
fn loading_splits_features_from_two_class_target() {
    let data = blood();
    assert_eq!(data.features.nrows(), data.target.len());
    assert_eq!(
        data.feature_names,
        vec!["Recency", "Frequency", "Monetary", "Time"]
    );
    assert_eq!(data.classes(), vec!["donated", "not donated"]);
}

#[test]
fn precision_without_pos_label_is_rejected() {
    let data = blood();
    let err = cross_val_score(
        &DecisionTreeClassifier::new(),
        &data,
        &CvStrategy::Folds(10),
        &Scorer::from_name("precision").unwrap(),
        ErrorScore::Raise,
    )
    .unwrap_err();

    match &err {
        CvError::Score { split, source, .. } => {
            assert_eq!(*split, 0);
            assert!(matches!(source, MetricError::InvalidPosLabel { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        "pos_label=1 is not a valid label. It should be one of ['donated', 'not donated']"
    );
}

#[test]
fn precision_with_pos_label_is_a_fraction() {
    let data = blood();
    let scores = cross_val_score(
        &DecisionTreeClassifier::new(),
        &data,
        &CvStrategy::Folds(10),
        &make_scorer(Metric::Precision, "donated"),
        ErrorScore::Raise,
    )
    .unwrap();
    assert_eq!(scores.len(), 10);
    assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
}

#[test]
fn multi_metric_scores_one_per_fold() {
    let data = blood();
    let cv = CvStrategy::Stratified(StratifiedKFold::new(5).shuffled(Some(0)));
    let scorers = [
        Scorer::from_name("accuracy").unwrap(),
        Scorer::from_name("balanced_accuracy").unwrap(),
    ];
    let results = cross_validate(
        &DecisionTreeClassifier::new(),
        &data,
        &cv,
        &scorers,
        ErrorScore::Raise,
        false,
    )
    .unwrap();

    let acc = results.test("accuracy").unwrap();
    let bal = results.test("balanced_accuracy").unwrap();
    assert_eq!(acc.len(), 5);
    assert_eq!(acc.len(), bal.len());
    assert!(acc.iter().chain(bal).all(|s| (0.0..=1.0).contains(s)));
    assert!(results.train_scores.is_none());
}

#[test]
fn exercise_report_walks_every_step() {
    let table = load_file(&fixture()).unwrap();
    let report = exercise::run(&table, &ExperimentConfig::default()).unwrap();

    assert_eq!(report.n_samples, 120);
    assert_eq!(report.accuracy.len(), 10);
    assert_eq!(report.balanced_accuracy.len(), 10);
    assert_eq!(report.precision.len(), 10);
    assert!(report
        .precision_error
        .as_deref()
        .unwrap()
        .starts_with("pos_label=1 is not a valid label"));
    assert_eq!(report.multi_metric.test_scores.len(), 2);

    let text = report.to_string();
    assert!(text.contains("test_balanced_accuracy"));
    assert!(text.contains("precision (make_scorer)"));
}

#[test]
fn parquet_tables_load_like_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blood.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("Recency", DataType::Int64, false),
        Field::new("Ratio", DataType::Float64, true),
        Field::new("Class", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(vec![2, 14, 3])),
            Arc::new(Float64Array::from(vec![Some(0.5), Some(1.5), Some(2.0)])),
            Arc::new(StringArray::from(vec!["donated", "not donated", "donated"])),
        ],
    )
    .unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let data = load_file(&path).unwrap().split_target("Class").unwrap();
    assert_eq!(data.feature_names, vec!["Recency", "Ratio"]);
    assert_eq!(data.features[[1, 0]], 14.0);
    assert_eq!(data.target, vec!["donated", "not donated", "donated"]);
}

#[test]
fn config_file_drives_the_exercise() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("experiment.json");
    std::fs::write(
        &path,
        r#"{"n_splits": 4, "metrics": ["accuracy", "f1"], "max_depth": 3}"#,
    )
    .unwrap();
    let config = ExperimentConfig::load(&path).unwrap();

    let table = load_file(&fixture()).unwrap();
    let report = exercise::run(&table, &config).unwrap();
    assert_eq!(report.multi_metric.n_splits(), 4);
    assert!(report.multi_metric.test("f1").is_some());
}

#[test]
fn repeated_metrics_do_not_reach_the_driver() {
    let config: ExperimentConfig =
        serde_json::from_str(r#"{"n_splits": 4, "metrics": ["accuracy", "accuracy"]}"#).unwrap();
    let table = load_file(&fixture()).unwrap();
    assert!(exercise::run(&table, &config).is_err());

    let scorers = [
        make_scorer(Metric::Precision, "donated"),
        make_scorer(Metric::Precision, "not donated"),
    ];
    let err = cross_validate(
        &DecisionTreeClassifier::new(),
        &blood(),
        &CvStrategy::Folds(5),
        &scorers,
        ErrorScore::Raise,
        false,
    )
    .unwrap_err();
    assert!(matches!(err, CvError::DuplicateScorer(_)));
}
