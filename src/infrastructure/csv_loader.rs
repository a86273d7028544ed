//! CSV ingestion for labeled training data.
//!
//! Expected columns: `stock_name,ticker` (header aliases `StockName` and
//! `Ticker` are accepted).

use crate::domain::types::StockRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

pub fn load_training_data(path: &Path) -> Result<Vec<StockRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: StockRecord =
            result.with_context(|| format!("Failed to parse CSV record in {path:?}"))?;
        records.push(record);
    }

    info!("Loaded {} training records from {:?}", records.len(), path);
    Ok(records)
}
