//! Load the fact table from loss_experience.csv

use super::writer::FACT_COLUMNS;
use super::{Dataset, LossRecord};
use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use csv::{Position, Reader, StringRecord};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Raw CSV row matching loss_experience.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    period: String,
    business_line: String,
    region: String,
    earned_premium: f64,
    incurred_loss: f64,
    developed_loss: f64,
}

impl CsvRow {
    fn to_record(self, line: u64) -> Result<LossRecord> {
        let malformed = |message: String| DashboardError::Malformed { line, message };

        let period = NaiveDate::parse_from_str(&self.period, "%Y-%m-%d")
            .map_err(|e| malformed(format!("invalid period '{}': {}", self.period, e)))?;

        if self.business_line.trim().is_empty() || self.region.trim().is_empty() {
            return Err(malformed("business_line and region must not be blank".to_string()));
        }

        for (name, value) in [
            ("earned_premium", self.earned_premium),
            ("incurred_loss", self.incurred_loss),
            ("developed_loss", self.developed_loss),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(malformed(format!("{} must be a non-negative number, got {}", name, value)));
            }
        }

        if self.developed_loss < self.incurred_loss {
            return Err(malformed(format!(
                "developed_loss {} is below incurred_loss {}",
                self.developed_loss, self.incurred_loss
            )));
        }

        Ok(LossRecord {
            period,
            business_line: self.business_line,
            region: self.region,
            earned_premium: self.earned_premium,
            incurred_loss: self.incurred_loss,
            developed_loss: self.developed_loss,
        })
    }
}

/// Load the fact table from a CSV file, failing fast on a missing or bad file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DashboardError::MissingData { path: path.to_path_buf() },
        _ => DashboardError::Io(e),
    })?;
    let dataset = load_dataset_from_reader(file)?;
    log::info!("Loaded {} rows from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Load the fact table from any reader (e.g., string buffer, network stream)
pub fn load_dataset_from_reader<R: std::io::Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    check_header(&headers)?;

    let mut records = Vec::new();
    let mut raw = StringRecord::new();
    loop {
        match csv_reader.read_record(&mut raw) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                return Err(DashboardError::Malformed {
                    line: line_of(e.position()),
                    message: e.to_string(),
                })
            }
        }
        // Physical line the record starts on, so quoted newlines are counted
        let line = line_of(raw.position());
        let row: CsvRow = raw.deserialize(Some(&headers)).map_err(|e| DashboardError::Malformed {
            line,
            message: e.to_string(),
        })?;
        records.push(row.to_record(line)?);
    }

    Ok(Dataset::new(records))
}

/// The header row must name exactly the fact table columns, in order
fn check_header(headers: &StringRecord) -> Result<()> {
    if headers.is_empty() {
        return Err(DashboardError::Malformed {
            line: 1,
            message: "empty file: expected a header row".to_string(),
        });
    }
    if !headers.iter().map(str::trim).eq(FACT_COLUMNS) {
        return Err(DashboardError::Malformed {
            line: 1,
            message: format!(
                "unexpected header '{}', expected '{}'",
                headers.iter().collect::<Vec<_>>().join(","),
                FACT_COLUMNS.join(",")
            ),
        });
    }
    Ok(())
}

fn line_of(position: Option<&Position>) -> u64 {
    position.map_or(0, Position::line)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "period,business_line,region,earned_premium,incurred_loss,developed_loss\n";

    #[test]
    fn test_load_from_reader() {
        let csv = format!("{}2024-01-01,Auto,East,1000.00,650.00,780.00\n", HEADER);
        let dataset = load_dataset_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);

        let r = &dataset.records()[0];
        assert_eq!(r.period, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(r.business_line, "Auto");
        assert_eq!(r.developed_loss, 780.0);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = load_dataset("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, DashboardError::MissingData { .. }));
        assert!(err.to_string().contains("definitely/not/here.csv"));
    }

    #[test]
    fn test_bad_period_reports_line() {
        let csv = format!(
            "{}2024-01-01,Auto,East,1000,650,780\nJanuary,Auto,East,1000,650,780\n",
            HEADER
        );
        match load_dataset_from_reader(csv.as_bytes()) {
            Err(DashboardError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        let csv = format!("{}2024-01-01,Auto,East,lots,650,780\n", HEADER);
        assert!(matches!(
            load_dataset_from_reader(csv.as_bytes()),
            Err(DashboardError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_developed_below_incurred_rejected() {
        let csv = format!("{}2024-01-01,Auto,East,1000,650,600\n", HEADER);
        let err = load_dataset_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("below incurred_loss"));
    }

    #[test]
    fn test_missing_column_rejected() {
        let csv = "period,business_line,region,earned_premium,incurred_loss\n2024-01-01,Auto,East,1000,650\n";
        assert!(matches!(
            load_dataset_from_reader(csv.as_bytes()),
            Err(DashboardError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = load_dataset_from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::Malformed { line: 1, .. }));
        assert!(err.to_string().contains("header"));
    }

    #[test]
    fn test_headerless_input_rejected() {
        let csv = "2024-01-01,Auto,East,1000.00,650.00,780.00\n";
        assert!(matches!(
            load_dataset_from_reader(csv.as_bytes()),
            Err(DashboardError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_wrong_header_without_rows_rejected() {
        assert!(matches!(
            load_dataset_from_reader("foo,bar\n".as_bytes()),
            Err(DashboardError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_header_only_loads_empty() {
        let dataset = load_dataset_from_reader(HEADER.as_bytes()).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_line_number_counts_quoted_newlines() {
        let csv = format!(
            "{}2024-01-01,\"Commercial\nAuto\",East,1000,650,780\n2024-02-01,Auto,East,1000,650,600\n",
            HEADER
        );
        match load_dataset_from_reader(csv.as_bytes()) {
            Err(DashboardError::Malformed { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_ragged_row_reports_line() {
        let csv = format!("{}2024-01-01,Auto,East,1000,650,780\n2024-02-01,Auto\n", HEADER);
        match load_dataset_from_reader(csv.as_bytes()) {
            Err(DashboardError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }
}
