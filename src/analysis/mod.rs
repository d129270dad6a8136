//! Filtering and aggregation behind the dashboard charts
//!
//! Every filter change recomputes a full [`DashboardView`] from the
//! read-only dataset; nothing is cached between calls.

mod aggregate;
mod filter;

pub use aggregate::{
    aggregate_by_period, aggregate_totals_by_period, compare_business_lines, summarize,
    LineComparison, PeriodAggregate, PeriodTotal, Totals,
};
pub use filter::FilterSelection;

use crate::dataset::Dataset;
use serde::Serialize;

/// Chart data for one filter selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Selection the view was computed for
    pub filter: FilterSelection,
    /// Loss ratio trend per business line
    pub series: Vec<PeriodAggregate>,
    /// Loss ratio trend across all selected lines
    pub totals_by_period: Vec<PeriodTotal>,
    /// Average loss ratio by business line, highest first
    pub comparison: Vec<LineComparison>,
    pub totals: Totals,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.totals.rows == 0
    }
}

/// Filter the dataset and compute every chart series
pub fn build_dashboard(dataset: &Dataset, filter: &FilterSelection) -> DashboardView {
    let rows = filter.apply(dataset);
    DashboardView {
        filter: filter.clone(),
        series: aggregate_by_period(&rows),
        totals_by_period: aggregate_totals_by_period(&rows),
        comparison: compare_business_lines(&rows),
        totals: summarize(&rows),
    }
}
