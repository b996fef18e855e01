//! Plan data model, snapshot loading, and editor-side validation

mod data;
pub mod loader;
pub mod validate;

pub use data::{
    birth_year_from_age, current_year, Asset, AssetKind, ExpenseStream, IncomeStream,
    MajorExpense, Plan, SavingsDistribution,
};
pub use loader::{load_plan, load_plan_from_reader, PlanLoadError};
pub use validate::{check_plan, PlanIssue};
