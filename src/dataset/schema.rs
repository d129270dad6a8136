//! Star-schema dimension tables exported next to the fact table
//!
//! The dashboard itself reads only the flat fact table; these files let
//! external BI tools join on surrogate keys.

use crate::config::GeneratorConfig;
use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const DIM_DATE_FILE: &str = "dim_date.csv";
pub const DIM_BUSINESS_LINE_FILE: &str = "dim_business_line.csv";
pub const DIM_REGION_FILE: &str = "dim_region.csv";

/// One reporting period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimDate {
    /// YYYYMMDD
    pub date_key: u32,
    pub full_date: NaiveDate,
    pub year: i32,
    pub quarter: String,
    pub month: u32,
    pub month_name: String,
}

impl DimDate {
    pub fn from_date(date: NaiveDate) -> Self {
        let year = date.year();
        let month = date.month();
        Self {
            date_key: year as u32 * 10_000 + month * 100 + date.day(),
            full_date: date,
            year,
            quarter: format!("Q{}", (month - 1) / 3 + 1),
            month,
            month_name: date.format("%B").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimBusinessLine {
    pub business_line_key: u32,
    pub line_name: String,
    pub target_loss_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimRegion {
    pub region_key: u32,
    pub region_name: String,
}

/// All three dimension tables for one generator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StarSchema {
    pub dates: Vec<DimDate>,
    pub business_lines: Vec<DimBusinessLine>,
    pub regions: Vec<DimRegion>,
}

impl StarSchema {
    /// Build dimension rows with 1-based surrogate keys in configuration order
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let dates = config.periods().into_iter().map(DimDate::from_date).collect();

        let business_lines = config
            .business_lines
            .iter()
            .enumerate()
            .map(|(i, line)| DimBusinessLine {
                business_line_key: i as u32 + 1,
                line_name: line.name.clone(),
                target_loss_ratio: line.target_loss_ratio,
            })
            .collect();

        let regions = config
            .regions
            .iter()
            .enumerate()
            .map(|(i, name)| DimRegion {
                region_key: i as u32 + 1,
                region_name: name.clone(),
            })
            .collect();

        Self { dates, business_lines, regions }
    }
}

/// Write dim_date.csv, dim_business_line.csv and dim_region.csv into `dir`
pub fn write_star_schema<P: AsRef<Path>>(config: &GeneratorConfig, dir: P) -> Result<StarSchema> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let schema = StarSchema::from_config(config);
    write_rows(&dir.join(DIM_DATE_FILE), &schema.dates)?;
    write_rows(&dir.join(DIM_BUSINESS_LINE_FILE), &schema.business_lines)?;
    write_rows(&dir.join(DIM_REGION_FILE), &schema.regions)?;

    log::info!(
        "Wrote dimension tables to {} ({} dates, {} lines, {} regions)",
        dir.display(),
        schema.dates.len(),
        schema.business_lines.len(),
        schema.regions.len()
    );
    Ok(schema)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
