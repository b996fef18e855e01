//! Projection engine for plan snapshots

mod amortization;
mod engine;
mod result;
mod state;

pub use amortization::annual_installment;
pub use engine::{project, surplus_policy, SurplusPolicy};
pub use result::{
    OneTimeCharge, ProjectionResult, ProjectionSummary, ProjectionWarning, Series, SeriesKey,
};
pub use state::YearSnapshot;
