//! Plan data structures matching the planner's snapshot format

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of years projected by a freshly created plan
const DEFAULT_HORIZON_YEARS: i32 = 60;

/// Get the current calendar year
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Derive a birth year from an age, relative to the current year
pub fn birth_year_from_age(age: u32) -> i32 {
    current_year() - age as i32
}

/// Asset category. Display and reporting only; the engine treats all
/// categories identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    #[serde(rename = "Cash & Equivalents")]
    Cash,
    #[serde(rename = "Stocks & Equities")]
    Stocks,
    #[serde(rename = "Movable Property (Car)")]
    MovableProperty,
    #[serde(rename = "Immovable Property (House)")]
    ImmovableProperty,
}

impl AssetKind {
    /// Get the string representation matching the snapshot format
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Cash => "Cash & Equivalents",
            AssetKind::Stocks => "Stocks & Equities",
            AssetKind::MovableProperty => "Movable Property (Car)",
            AssetKind::ImmovableProperty => "Immovable Property (House)",
        }
    }
}

/// A recurring income stream, active over an inclusive year window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStream {
    /// Unique opaque identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// First year the stream is active (inclusive)
    pub start_year: i32,

    /// Last year the stream is active (inclusive)
    pub end_year: i32,

    /// Amount in the stream's first active year
    pub annual_amount: f64,

    /// Annual growth in percent, compounded over contiguous active years
    pub annual_growth: f64,
}

impl IncomeStream {
    /// Whether the stream contributes in the given year
    pub fn is_active(&self, year: i32) -> bool {
        year >= self.start_year && year <= self.end_year
    }
}

/// A recurring expense stream. Same window and growth semantics as
/// [`IncomeStream`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStream {
    pub id: String,
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
    pub annual_amount: f64,
    pub annual_growth: f64,
}

impl ExpenseStream {
    /// Whether the stream contributes in the given year
    pub fn is_active(&self, year: i32) -> bool {
        year >= self.start_year && year <= self.end_year
    }
}

/// A major expense: either a one-time outlay or a financed purchase paid
/// off in equal annual installments
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorExpense {
    /// Unique opaque identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Full purchase amount
    pub total_amount: f64,

    /// When true the expense recurs as annual installments; when false it
    /// fires once at `installment_start_year`
    pub is_in_installments: bool,

    /// Precomputed annual installment (see `annual_installment`); the engine
    /// never recomputes it
    pub annual_installment_amount: f64,

    /// First installment year, or the firing year for one-time expenses
    pub installment_start_year: i32,

    /// Last installment year (inclusive)
    pub installment_end_year: i32,

    /// Annual interest in percent used when the installment was computed
    pub annual_interest: f64,
}

impl MajorExpense {
    /// Whether an installment is due in the given year
    pub fn in_installment_window(&self, year: i32) -> bool {
        year >= self.installment_start_year && year <= self.installment_end_year
    }
}

/// An asset holding with its own growth rate and draw-down priority
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Unique opaque identifier
    pub id: String,

    /// Asset category (display only)
    #[serde(rename = "type")]
    pub kind: AssetKind,

    /// Display name
    pub name: String,

    /// Opening balance at the plan's start year
    pub current_amount: f64,

    /// Annual growth in percent, compounded annually
    pub annual_growth: f64,

    /// Draw-down priority, 1-10; higher is drained first under a deficit
    pub spend_priority: u8,

    /// Eligible recipient of surplus cash when no distribution rule applies
    pub is_for_savings: bool,
}

/// A time-windowed rule for splitting surplus cash across assets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsDistribution {
    /// Unique opaque identifier
    pub id: String,

    /// First year the rule applies (inclusive)
    pub start_year: i32,

    /// Last year the rule applies (inclusive)
    pub end_year: i32,

    /// Asset id -> percentage share of the surplus. The editor keeps the
    /// percentages summing to 100; the engine does not renormalize.
    pub distribution: BTreeMap<String, f64>,
}

impl SavingsDistribution {
    /// Whether the rule's window contains the given year
    pub fn applies_to(&self, year: i32) -> bool {
        year >= self.start_year && year <= self.end_year
    }

    /// Sum of the rule's percentage shares
    pub fn percentage_total(&self) -> f64 {
        self.distribution.values().sum()
    }
}

/// A full financial plan snapshot: the horizon, all declared cash flows,
/// and the surplus distribution rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// First projected year (inclusive)
    pub start_year: i32,

    /// Last projected year (inclusive). Not guaranteed to be >= `start_year`;
    /// the engine clamps.
    pub end_year: i32,

    /// Informational; not used by the engine
    pub user_age: u32,

    /// Informational; not used by the engine
    pub birth_year: i32,

    pub income_streams: Vec<IncomeStream>,
    pub expense_streams: Vec<ExpenseStream>,
    pub major_expenses: Vec<MajorExpense>,
    pub assets: Vec<Asset>,
    pub savings_distributions: Vec<SavingsDistribution>,
}

impl Plan {
    /// Create an empty plan for a user of the given age, starting this year
    /// with the default horizon
    pub fn new(user_age: u32) -> Self {
        let start_year = current_year();
        Self {
            start_year,
            end_year: start_year + DEFAULT_HORIZON_YEARS,
            user_age,
            birth_year: birth_year_from_age(user_age),
            income_streams: Vec::new(),
            expense_streams: Vec::new(),
            major_expenses: Vec::new(),
            assets: Vec::new(),
            savings_distributions: Vec::new(),
        }
    }

    /// Effective last projected year, clamped so the horizon is never empty
    pub fn effective_end_year(&self) -> i32 {
        self.end_year.max(self.start_year)
    }

    /// Number of projected years, both horizon ends inclusive
    pub fn horizon_len(&self) -> usize {
        (self.effective_end_year() - self.start_year + 1) as usize
    }

    /// Position of an asset in plan order, if it still exists
    pub fn asset_index(&self, asset_id: &str) -> Option<usize> {
        self.assets.iter().position(|a| a.id == asset_id)
    }
}
