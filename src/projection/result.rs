//! Result structures for plan projections

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifies one column of a projection result.
///
/// Installment columns carry the originating major expense id; `Default` is
/// the synthetic zero column emitted when a plan category is empty so the
/// result shape never degenerates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeriesKey {
    /// A stream or asset, keyed by its plan id
    Id(String),
    /// The recurring payments of an installment-based major expense
    Installment(String),
    /// Synthetic placeholder for an empty category
    Default,
}

impl SeriesKey {
    /// Column label used by the CSV export
    pub fn label(&self) -> String {
        match self {
            SeriesKey::Id(id) => id.clone(),
            SeriesKey::Installment(id) => format!("installment-{}", id),
            SeriesKey::Default => "default".to_string(),
        }
    }
}

/// One column of per-year values, in horizon order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub key: SeriesKey,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(key: SeriesKey, values: Vec<f64>) -> Self {
        Self { key, values }
    }

    /// Synthetic all-zero column for an empty category
    pub fn default_zeros(len: usize) -> Self {
        Self {
            key: SeriesKey::Default,
            values: vec![0.0; len],
        }
    }
}

/// A one-time major expense that fired during the horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneTimeCharge {
    pub year: i32,
    pub amount: f64,
}

/// A condition the engine tolerated but that silently shaped the result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectionWarning {
    /// An installment window starts before the plan horizon; payments due
    /// before the start year are not projected
    InstallmentBeforeHorizon { expense_id: String },

    /// A distribution rule names an asset no longer in the plan; its share
    /// of the surplus was skipped without renormalizing
    StaleAssetReference { year: i32, asset_id: String },

    /// A deficit exhausted every asset; the remainder was dropped
    UnabsorbedDeficit { year: i32, amount: f64 },

    /// Surplus cash had no asset to land in and was dropped
    DroppedSurplus { year: i32, amount: f64 },
}

/// Year-indexed projection of a plan: parallel per-entity columns plus the
/// net worth and savings aggregates. All value vectors have one entry per
/// horizon year; column order follows plan collection order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// The projected calendar years, inclusive of both horizon ends
    pub years: Vec<i32>,

    /// Per-income-stream values
    pub incomes: Vec<Series>,

    /// Per-expense-stream values followed by installment columns
    pub expenses: Vec<Series>,

    /// One-time major expenses, keyed by expense id
    pub one_time_expenses: BTreeMap<String, OneTimeCharge>,

    /// Per-asset balances
    pub assets: Vec<Series>,

    /// Sum of all asset balances, per year
    pub net_worth: Vec<f64>,

    /// Total income minus total expense, per year, before allocation or burn
    pub savings: Vec<f64>,

    /// Conditions tolerated during the run
    pub warnings: Vec<ProjectionWarning>,
}

impl ProjectionResult {
    /// Number of projected years
    pub fn horizon_len(&self) -> usize {
        self.years.len()
    }

    /// Total income across all streams at a year index
    pub fn income_total_at(&self, index: usize) -> f64 {
        self.incomes.iter().map(|s| s.values[index]).sum()
    }

    /// Total expense across streams and installments at a year index
    pub fn expense_total_at(&self, index: usize) -> f64 {
        self.expenses.iter().map(|s| s.values[index]).sum()
    }

    /// Balance column for an asset id, if present
    pub fn asset_series(&self, asset_id: &str) -> Option<&[f64]> {
        self.assets
            .iter()
            .find(|s| s.key == SeriesKey::Id(asset_id.to_string()))
            .map(|s| s.values.as_slice())
    }

    /// Expense column for a series key, if present
    pub fn expense_series(&self, key: &SeriesKey) -> Option<&[f64]> {
        self.expenses
            .iter()
            .find(|s| &s.key == key)
            .map(|s| s.values.as_slice())
    }

    /// Summary statistics over the full horizon
    pub fn summary(&self) -> ProjectionSummary {
        let final_net_worth = self.net_worth.last().copied().unwrap_or(0.0);
        let peak_net_worth = self.net_worth.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lowest_net_worth = self.net_worth.iter().copied().fold(f64::INFINITY, f64::min);

        ProjectionSummary {
            years: self.years.len(),
            start_year: self.years.first().copied().unwrap_or(0),
            end_year: self.years.last().copied().unwrap_or(0),
            final_net_worth,
            peak_net_worth,
            lowest_net_worth,
            total_saved: self.savings.iter().sum(),
            one_time_expense_total: self.one_time_expenses.values().map(|c| c.amount).sum(),
            warning_count: self.warnings.len(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: usize,
    pub start_year: i32,
    pub end_year: i32,
    pub final_net_worth: f64,
    pub peak_net_worth: f64,
    pub lowest_net_worth: f64,
    pub total_saved: f64,
    pub one_time_expense_total: f64,
    pub warning_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_key_labels() {
        assert_eq!(SeriesKey::Id("salary".to_string()).label(), "salary");
        assert_eq!(
            SeriesKey::Installment("house".to_string()).label(),
            "installment-house"
        );
        assert_eq!(SeriesKey::Default.label(), "default");
    }

    #[test]
    fn test_totals_and_summary() {
        let result = ProjectionResult {
            years: vec![2025, 2026],
            incomes: vec![
                Series::new(SeriesKey::Id("a".to_string()), vec![100.0, 110.0]),
                Series::new(SeriesKey::Id("b".to_string()), vec![50.0, 0.0]),
            ],
            expenses: vec![Series::new(SeriesKey::Id("rent".to_string()), vec![80.0, 80.0])],
            one_time_expenses: BTreeMap::new(),
            assets: vec![Series::new(SeriesKey::Id("cash".to_string()), vec![10.0, 90.0])],
            net_worth: vec![10.0, 90.0],
            savings: vec![70.0, 30.0],
            warnings: Vec::new(),
        };

        assert_eq!(result.income_total_at(0), 150.0);
        assert_eq!(result.expense_total_at(1), 80.0);

        let summary = result.summary();
        assert_eq!(summary.years, 2);
        assert_eq!(summary.final_net_worth, 90.0);
        assert_eq!(summary.peak_net_worth, 90.0);
        assert_eq!(summary.lowest_net_worth, 10.0);
        assert_eq!(summary.total_saved, 100.0);
    }
}
