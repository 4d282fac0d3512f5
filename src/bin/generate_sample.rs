use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Number of donors in the original blood-transfusion survey.
const N_DONORS: usize = 748;
/// Blood units are 250 c.c. each.
const CC_PER_DONATION: i64 = 250;

/// One row of `blood_transfusion.csv`.
#[derive(Debug, Serialize)]
struct Donor {
    #[serde(rename = "Recency")]
    recency: i64,
    #[serde(rename = "Frequency")]
    frequency: i64,
    #[serde(rename = "Monetary")]
    monetary: i64,
    #[serde(rename = "Time")]
    time: i64,
    #[serde(rename = "Class")]
    class: &'static str,
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn generate_donor(rng: &mut StdRng) -> Donor {
    // Months since last donation: mostly recent, long tail.
    let recency = (rng.random::<f64>().powi(2) * 74.0).round() as i64;
    let frequency = 1 + (rng.random::<f64>().powi(3) * 49.0).round() as i64;
    // First donation at least `frequency` months before the last one.
    let time = recency + frequency + rng.random_range(0..60);

    // Frequent, recent donors come back more often.
    let z = -1.2 - 0.08 * recency as f64 + 0.09 * frequency as f64 - 0.01 * time as f64;
    let donated = rng.random::<f64>() < sigmoid(z + 0.9);

    Donor {
        recency,
        frequency,
        monetary: frequency * CC_PER_DONATION,
        time,
        class: if donated { "donated" } else { "not donated" },
    }
}

fn write_csv(path: &Path, donors: &[Donor]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for donor in donors {
        writer.serialize(donor).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, donors: &[Donor]) -> Result<()> {
    let int_column = |f: fn(&Donor) -> i64| Int64Array::from(donors.iter().map(f).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("Recency", DataType::Int64, false),
        Field::new("Frequency", DataType::Int64, false),
        Field::new("Monetary", DataType::Int64, false),
        Field::new("Time", DataType::Int64, false),
        Field::new("Class", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(int_column(|d| d.recency)),
            Arc::new(int_column(|d| d.frequency)),
            Arc::new(int_column(|d| d.monetary)),
            Arc::new(int_column(|d| d.time)),
            Arc::new(StringArray::from(
                donors.iter().map(|d| d.class).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("datasets/blood_transfusion.csv"));

    let mut rng = StdRng::seed_from_u64(42);
    let donors: Vec<Donor> = (0..N_DONORS).map(|_| generate_donor(&mut rng)).collect();

    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let is_parquet = matches!(
        output_path.extension().and_then(|e| e.to_str()),
        Some("parquet" | "pq")
    );
    if is_parquet {
        write_parquet(&output_path, &donors)?;
    } else {
        write_csv(&output_path, &donors)?;
    }

    let n_donated = donors.iter().filter(|d| d.class == "donated").count();
    println!(
        "Wrote {} donors ({} donated) to {}",
        donors.len(),
        n_donated,
        output_path.display()
    );
    Ok(())
}
