//! Write the fact table as loss_experience.csv

use super::Dataset;
use crate::error::Result;
use csv::Writer;
use std::fs::{self, File};
use std::path::Path;

/// File name of the flat fact table inside an output directory
pub const FACT_TABLE_FILE: &str = "loss_experience.csv";

/// Fact table columns, in file order
pub const FACT_COLUMNS: [&str; 6] = [
    "period",
    "business_line",
    "region",
    "earned_premium",
    "incurred_loss",
    "developed_loss",
];

/// Write the fact table to `path`, creating parent directories as needed
pub fn write_dataset<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_dataset_to_writer(dataset, file)?;
    log::info!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}

/// Write the fact table to any writer. Amounts are fixed at two decimals so
/// the same dataset always produces the same bytes.
pub fn write_dataset_to_writer<W: std::io::Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(FACT_COLUMNS)?;

    for row in dataset.records() {
        csv_writer.write_record([
            row.period.format("%Y-%m-%d").to_string(),
            row.business_line.clone(),
            row.region.clone(),
            format!("{:.2}", row.earned_premium),
            format!("{:.2}", row.incurred_loss),
            format!("{:.2}", row.developed_loss),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
