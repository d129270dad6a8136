//! Fact table row and the read-only dataset built from it

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Loss divided by premium, 0 when no premium was earned
pub fn loss_ratio(loss: f64, premium: f64) -> f64 {
    if premium != 0.0 {
        loss / premium
    } else {
        0.0
    }
}

/// One row of the fact table: a (business line, region, period) cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossRecord {
    /// First day of the reporting month
    pub period: NaiveDate,
    pub business_line: String,
    pub region: String,
    pub earned_premium: f64,
    /// As-reported loss estimate
    pub incurred_loss: f64,
    /// Ultimate loss after development, never below `incurred_loss`
    pub developed_loss: f64,
}

impl LossRecord {
    pub fn reported_loss_ratio(&self) -> f64 {
        loss_ratio(self.incurred_loss, self.earned_premium)
    }

    pub fn developed_loss_ratio(&self) -> f64 {
        loss_ratio(self.developed_loss, self.earned_premium)
    }

    /// Implied development factor (developed / incurred)
    pub fn development_factor(&self) -> f64 {
        if self.incurred_loss > 0.0 {
            self.developed_loss / self.incurred_loss
        } else {
            1.0
        }
    }
}

/// Immutable in-memory fact table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<LossRecord>,
}

impl Dataset {
    pub fn new(records: Vec<LossRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LossRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct business lines in first-seen order
    pub fn business_lines(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.business_line.as_str()))
    }

    /// Distinct regions in first-seen order
    pub fn regions(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.region.as_str()))
    }

    /// Earliest and latest period, None for an empty table
    pub fn period_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.period).min()?;
        let max = self.records.iter().map(|r| r.period).max()?;
        Some((min, max))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}
