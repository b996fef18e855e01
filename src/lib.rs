//! Net Worth Projector - deterministic projection engine for household financial plans
//!
//! This library provides:
//! - A plan data model (income/expense streams, major expenses, assets,
//!   savings-distribution rules) with JSON snapshot loading
//! - A pure year-by-year projection engine producing per-entity series,
//!   net worth, and savings
//! - A loan amortization helper for installment-based major expenses
//! - CSV export of projection results
//! - A scenario runner for growth sweeps and parallel plan batches

pub mod export;
pub mod plan;
pub mod projection;
pub mod scenario;
pub mod util;

// Re-export commonly used types
pub use plan::{Asset, AssetKind, ExpenseStream, IncomeStream, MajorExpense, Plan, SavingsDistribution};
pub use projection::{annual_installment, project, ProjectionResult, ProjectionSummary, ProjectionWarning};
pub use scenario::ScenarioRunner;
