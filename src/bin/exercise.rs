use std::path::PathBuf;

use anyhow::{Context, Result};
use rusty_folds::data::loader::load_file;
use rusty_folds::{exercise, ExperimentConfig};

const DEFAULT_DATA: &str = "datasets/blood_transfusion.csv";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let data_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_DATA.to_string()));
    let config = match args.next() {
        Some(path) => ExperimentConfig::load(&PathBuf::from(&path))
            .with_context(|| format!("loading config {path}"))?,
        None => ExperimentConfig::default(),
    };

    let table = load_file(&data_path)?;
    let report = exercise::run(&table, &config).context("running cross-validation exercise")?;
    print!("{report}");
    Ok(())
}
