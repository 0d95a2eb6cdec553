// Dataset loading: CSV or JSON files of recipe rows, with incomplete rows
// dropped and an optional deterministic sample taken.

use crate::corpus::recipe::RecipeRecord;
use crate::error::{Error, Result};
use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info, warn};

/// Columns every dataset must provide
pub const REQUIRED_COLUMNS: &[&str] = &[
    "name",
    "description",
    "ingredients",
    "tags",
    "nutrition",
    "steps",
    "minutes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Number of rows to keep; 0 keeps every row
    pub sample_size: usize,
    pub seed: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sample_size: 500,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatasetFormat {
    Csv,
    Json,
}

impl DatasetFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(DatasetFormat::Csv),
            Some("json") => Ok(DatasetFormat::Json),
            _ => Err(Error::Dataset(format!(
                "Unsupported dataset format for {} (expected .csv or .json)",
                path.display()
            ))),
        }
    }
}

/// One row as it appears in the file; any field may be missing
#[derive(Debug, Deserialize)]
struct RawRow {
    name: Option<String>,
    description: Option<String>,
    ingredients: Option<String>,
    tags: Option<String>,
    nutrition: Option<String>,
    steps: Option<String>,
    minutes: Option<i64>,
}

impl RawRow {
    fn into_record(self) -> anyhow::Result<RecipeRecord> {
        Ok(RecipeRecord {
            name: required(self.name, "name")?,
            description: required(self.description, "description")?,
            ingredients: required(self.ingredients, "ingredients")?,
            tags: required(self.tags, "tags")?,
            nutrition: required(self.nutrition, "nutrition")?,
            steps: required(self.steps, "steps")?,
            minutes: self.minutes.context("missing minutes")?,
        })
    }
}

fn required(value: Option<String>, field: &str) -> anyhow::Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("missing {field}"))
}

/// Load complete recipe rows from a `.csv` or `.json` dataset.
///
/// Rows with a missing or malformed field are dropped. When the file holds
/// more than `options.sample_size` usable rows a seeded random sample is
/// taken; sampled rows keep their file order.
pub fn load_records<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Vec<RecipeRecord>> {
    let path = path.as_ref();
    info!("Loading dataset from {}", path.display());

    let rows = match DatasetFormat::from_path(path)? {
        DatasetFormat::Csv => read_csv(path)?,
        DatasetFormat::Json => read_json(path)?,
    };

    let total = rows.len();
    let mut records = Vec::with_capacity(total);
    for (index, row) in rows.into_iter().enumerate() {
        match row.and_then(RawRow::into_record) {
            Ok(record) => records.push(record),
            Err(e) => debug!("Dropping dataset row {}: {:#}", index + 1, e),
        }
    }

    let dropped = total - records.len();
    if dropped > 0 {
        warn!("Dropped {} of {} dataset rows with missing fields", dropped, total);
    }

    let records = sample(records, options);
    info!("Loaded {} recipes", records.len());

    Ok(records)
}

fn read_csv(path: &Path) -> Result<Vec<anyhow::Result<RawRow>>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(Error::Dataset(format!(
                "Dataset {} is missing required column '{}'",
                path.display(),
                column
            )));
        }
    }

    Ok(reader
        .deserialize::<RawRow>()
        .map(|row| row.context("row does not match the expected columns"))
        .collect())
}

fn read_json(path: &Path) -> Result<Vec<anyhow::Result<RawRow>>> {
    let file = File::open(path)?;
    let values: Vec<serde_json::Value> = serde_json::from_reader(BufReader::new(file))?;

    Ok(values
        .into_iter()
        .map(|value| serde_json::from_value::<RawRow>(value).context("malformed record"))
        .collect())
}

fn sample(records: Vec<RecipeRecord>, options: &LoadOptions) -> Vec<RecipeRecord> {
    if options.sample_size == 0 || records.len() <= options.sample_size {
        return records;
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut keep = vec![false; records.len()];
    for index in rand::seq::index::sample(&mut rng, records.len(), options.sample_size) {
        keep[index] = true;
    }

    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, kept)| kept.then_some(record))
        .collect()
}
