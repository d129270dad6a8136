//! Filter selection sent by the dashboard controls

use crate::dataset::{Dataset, LossRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Business line / region subsets and an inclusive period range.
///
/// `None` on a dimension means "no restriction"; `Some(vec![])` selects
/// nothing. An inverted date range simply matches no rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub business_lines: Option<Vec<String>>,

    #[serde(default)]
    pub regions: Option<Vec<String>>,

    /// Earliest period included
    #[serde(default)]
    pub start: Option<NaiveDate>,

    /// Latest period included
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl FilterSelection {
    /// Selection matching every row
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_business_lines(mut self, lines: &[&str]) -> Self {
        self.business_lines = Some(lines.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_regions(mut self, regions: &[&str]) -> Self {
        self.regions = Some(regions.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn matches(&self, record: &LossRecord) -> bool {
        if let Some(ref lines) = self.business_lines {
            if !lines.iter().any(|l| *l == record.business_line) {
                return false;
            }
        }
        if let Some(ref regions) = self.regions {
            if !regions.iter().any(|r| *r == record.region) {
                return false;
            }
        }
        if let Some(start) = self.start {
            if record.period < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if record.period > end {
                return false;
            }
        }
        true
    }

    /// Rows of `dataset` matching this selection, in table order
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a LossRecord> {
        dataset.records().iter().filter(|r| self.matches(r)).collect()
    }
}
