//! Grouped sums and loss ratios for the dashboard charts

use crate::dataset::{loss_ratio, LossRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Running sums over a group of rows
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Accumulator {
    rows: usize,
    earned_premium: f64,
    incurred_loss: f64,
    developed_loss: f64,
}

impl Accumulator {
    fn add(&mut self, record: &LossRecord) {
        self.rows += 1;
        self.earned_premium += record.earned_premium;
        self.incurred_loss += record.incurred_loss;
        self.developed_loss += record.developed_loss;
    }

    fn reported(&self) -> f64 {
        loss_ratio(self.incurred_loss, self.earned_premium)
    }

    fn developed(&self) -> f64 {
        loss_ratio(self.developed_loss, self.earned_premium)
    }
}

/// One point of the per-business-line time series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodAggregate {
    pub period: NaiveDate,
    pub business_line: String,
    pub earned_premium: f64,
    pub incurred_loss: f64,
    pub developed_loss: f64,
    pub reported_loss_ratio: f64,
    pub developed_loss_ratio: f64,
}

/// One point of the all-lines time series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub period: NaiveDate,
    pub earned_premium: f64,
    pub incurred_loss: f64,
    pub developed_loss: f64,
    pub reported_loss_ratio: f64,
    pub developed_loss_ratio: f64,
}

/// Average loss ratio of one business line over the whole selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineComparison {
    pub business_line: String,
    pub earned_premium: f64,
    pub reported_loss_ratio: f64,
    pub developed_loss_ratio: f64,
}

/// Overall sums for the selection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Totals {
    pub rows: usize,
    pub earned_premium: f64,
    pub incurred_loss: f64,
    pub developed_loss: f64,
    pub reported_loss_ratio: f64,
    pub developed_loss_ratio: f64,
}

/// Sum premium and losses per (period, business line), sorted by period then line
pub fn aggregate_by_period(rows: &[&LossRecord]) -> Vec<PeriodAggregate> {
    let mut groups: BTreeMap<(NaiveDate, &str), Accumulator> = BTreeMap::new();
    for row in rows {
        groups.entry((row.period, row.business_line.as_str())).or_default().add(row);
    }

    groups
        .into_iter()
        .map(|((period, line), acc)| PeriodAggregate {
            period,
            business_line: line.to_string(),
            earned_premium: acc.earned_premium,
            incurred_loss: acc.incurred_loss,
            developed_loss: acc.developed_loss,
            reported_loss_ratio: acc.reported(),
            developed_loss_ratio: acc.developed(),
        })
        .collect()
}

/// Sum premium and losses per period across every selected line
pub fn aggregate_totals_by_period(rows: &[&LossRecord]) -> Vec<PeriodTotal> {
    let mut groups: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();
    for row in rows {
        groups.entry(row.period).or_default().add(row);
    }

    groups
        .into_iter()
        .map(|(period, acc)| PeriodTotal {
            period,
            earned_premium: acc.earned_premium,
            incurred_loss: acc.incurred_loss,
            developed_loss: acc.developed_loss,
            reported_loss_ratio: acc.reported(),
            developed_loss_ratio: acc.developed(),
        })
        .collect()
}

/// Average loss ratio per business line (Σloss / Σpremium), highest developed ratio first
pub fn compare_business_lines(rows: &[&LossRecord]) -> Vec<LineComparison> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for row in rows {
        groups.entry(row.business_line.as_str()).or_default().add(row);
    }

    let mut comparison: Vec<LineComparison> = groups
        .into_iter()
        .map(|(line, acc)| LineComparison {
            business_line: line.to_string(),
            earned_premium: acc.earned_premium,
            reported_loss_ratio: acc.reported(),
            developed_loss_ratio: acc.developed(),
        })
        .collect();

    comparison.sort_by(|a, b| b.developed_loss_ratio.total_cmp(&a.developed_loss_ratio));
    comparison
}

pub fn summarize(rows: &[&LossRecord]) -> Totals {
    let mut acc = Accumulator::default();
    for row in rows {
        acc.add(row);
    }
    Totals {
        rows: acc.rows,
        earned_premium: acc.earned_premium,
        incurred_loss: acc.incurred_loss,
        developed_loss: acc.developed_loss,
        reported_loss_ratio: acc.reported(),
        developed_loss_ratio: acc.developed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(line: &str, month: u32, premium: f64, incurred: f64, developed: f64) -> LossRecord {
        LossRecord {
            period: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
            business_line: line.to_string(),
            region: "East".to_string(),
            earned_premium: premium,
            incurred_loss: incurred,
            developed_loss: developed,
        }
    }

    #[test]
    fn test_single_row_ratios() {
        let r = row("Auto", 1, 1000.0, 650.0, 780.0);
        let series = aggregate_by_period(&[&r]);
        assert_eq!(series.len(), 1);
        assert_relative_eq!(series[0].reported_loss_ratio, 0.65);
        assert_relative_eq!(series[0].developed_loss_ratio, 0.78);
    }

    #[test]
    fn test_groups_sum_within_period_and_line() {
        let rows = vec![
            row("Auto", 1, 1000.0, 600.0, 700.0),
            row("Auto", 1, 3000.0, 1800.0, 2400.0),
            row("Property", 1, 2000.0, 800.0, 900.0),
            row("Auto", 2, 500.0, 100.0, 150.0),
        ];
        let refs: Vec<&LossRecord> = rows.iter().collect();

        let series = aggregate_by_period(&refs);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].business_line, "Auto");
        assert_relative_eq!(series[0].earned_premium, 4000.0);
        assert_relative_eq!(series[0].reported_loss_ratio, 0.6);
        assert_relative_eq!(series[0].developed_loss_ratio, 0.775);
        assert_eq!(series[1].business_line, "Property");
        assert_eq!(series[2].period, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());

        let totals = aggregate_totals_by_period(&refs);
        assert_eq!(totals.len(), 2);
        assert_relative_eq!(totals[0].earned_premium, 6000.0);
        assert_relative_eq!(totals[0].incurred_loss, 3200.0);
    }

    #[test]
    fn test_comparison_sorted_descending() {
        let rows = vec![
            row("Property", 1, 1000.0, 400.0, 450.0),
            row("Liability", 1, 1000.0, 700.0, 900.0),
            row("Auto", 1, 1000.0, 650.0, 780.0),
        ];
        let refs: Vec<&LossRecord> = rows.iter().collect();
        let comparison = compare_business_lines(&refs);
        let order: Vec<&str> = comparison.iter().map(|c| c.business_line.as_str()).collect();
        assert_eq!(order, vec!["Liability", "Auto", "Property"]);
    }

    #[test]
    fn test_zero_premium_group_ratio_is_zero() {
        let r = row("Auto", 1, 0.0, 0.0, 0.0);
        let comparison = compare_business_lines(&[&r]);
        assert_eq!(comparison[0].reported_loss_ratio, 0.0);
        assert_eq!(comparison[0].developed_loss_ratio, 0.0);
    }

    #[test]
    fn test_empty_input_yields_empty_aggregates() {
        assert!(aggregate_by_period(&[]).is_empty());
        assert!(aggregate_totals_by_period(&[]).is_empty());
        assert!(compare_business_lines(&[]).is_empty());
        let totals = summarize(&[]);
        assert_eq!(totals.rows, 0);
        assert_eq!(totals.reported_loss_ratio, 0.0);
    }
}
