//! Per-year fold state for a projection
//!
//! The engine computes the horizon as a fold: each year's snapshot is built
//! from the plan and the previous year's committed snapshot, never by
//! mutating shared arrays across iterations.

use crate::plan::Plan;

/// The committed values of one projected year.
///
/// The per-entity vectors run parallel to the plan's collections:
/// `stream_incomes[j]` belongs to `plan.income_streams[j]`, and so on.
/// Installment slots belonging to one-time major expenses stay zero.
#[derive(Debug, Clone)]
pub struct YearSnapshot {
    /// Position in the horizon, 0-indexed
    pub index: usize,

    /// Calendar year
    pub year: i32,

    /// Per-income-stream value this year
    pub stream_incomes: Vec<f64>,

    /// Per-expense-stream value this year
    pub stream_expenses: Vec<f64>,

    /// Per-major-expense installment due this year
    pub installments: Vec<f64>,

    /// Per-asset balance at the end of this year's update
    pub asset_balances: Vec<f64>,

    /// Sum of all stream incomes
    pub total_income: f64,

    /// Sum of all stream expenses and installments
    pub total_expense: f64,

    /// `total_income - total_expense`, recorded before allocation or burn
    pub savings: f64,

    /// Sum of all asset balances
    pub net_worth: f64,
}

impl YearSnapshot {
    /// Empty snapshot for a year, everything zeroed
    pub fn zeroed(plan: &Plan, index: usize, year: i32) -> Self {
        Self {
            index,
            year,
            stream_incomes: vec![0.0; plan.income_streams.len()],
            stream_expenses: vec![0.0; plan.expense_streams.len()],
            installments: vec![0.0; plan.major_expenses.len()],
            asset_balances: vec![0.0; plan.assets.len()],
            total_income: 0.0,
            total_expense: 0.0,
            savings: 0.0,
            net_worth: 0.0,
        }
    }

    /// Commit the aggregates once the per-entity values are in place
    pub fn commit_totals(&mut self) {
        self.total_income = self.stream_incomes.iter().sum();
        self.total_expense =
            self.stream_expenses.iter().sum::<f64>() + self.installments.iter().sum::<f64>();
        self.savings = self.total_income - self.total_expense;
    }

    /// Commit the net worth once the asset balances are in place
    pub fn commit_net_worth(&mut self) {
        self.net_worth = self.asset_balances.iter().sum();
    }
}
