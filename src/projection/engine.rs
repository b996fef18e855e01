//! Core projection engine
//!
//! Turns a plan snapshot into a year-indexed projection. The engine is pure
//! and total: it performs no I/O, never fails for a structurally valid plan,
//! and recomputes the full horizon on every call. Conditions it tolerates
//! silently shape the result and are reported as [`ProjectionWarning`]s.

use super::result::{OneTimeCharge, ProjectionResult, ProjectionWarning, Series, SeriesKey};
use super::state::YearSnapshot;
use crate::plan::Plan;
use log::warn;
use std::collections::BTreeMap;

/// Which rung of the surplus allocation ladder applies in a given year.
///
/// The ladder order is part of the engine contract: a matching distribution
/// rule with a non-empty share map wins, then an even split across
/// savings-flagged assets, then the first asset in plan order. A plan with no
/// assets drops the surplus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurplusPolicy {
    /// Index into `plan.savings_distributions` of the applicable rule
    Distribution(usize),

    /// Indices into `plan.assets` of the savings-flagged assets sharing
    /// the surplus evenly
    EvenSplit(Vec<usize>),

    /// Entire surplus goes to the first asset in plan order
    FirstAsset,

    /// No asset exists to receive the surplus
    Unallocated,
}

/// Decide which allocation rung applies for a year.
///
/// Rules are scanned in plan order and the first whose window contains the
/// year wins, whether or not its share map turns out to be empty; an empty
/// map falls through to the ladder rather than to later rules.
pub fn surplus_policy(plan: &Plan, year: i32) -> SurplusPolicy {
    if let Some(i) = plan
        .savings_distributions
        .iter()
        .position(|rule| rule.applies_to(year))
    {
        if !plan.savings_distributions[i].distribution.is_empty() {
            return SurplusPolicy::Distribution(i);
        }
    }

    let flagged: Vec<usize> = plan
        .assets
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_for_savings)
        .map(|(j, _)| j)
        .collect();
    if !flagged.is_empty() {
        return SurplusPolicy::EvenSplit(flagged);
    }

    if plan.assets.is_empty() {
        SurplusPolicy::Unallocated
    } else {
        SurplusPolicy::FirstAsset
    }
}

/// Project a plan over its horizon.
///
/// The horizon is `[start_year, max(start_year, end_year)]` inclusive; a
/// reversed horizon clamps to a single year. Each year is computed from the
/// previous year's committed snapshot only.
pub fn project(plan: &Plan) -> ProjectionResult {
    let start_year = plan.start_year;
    let end_year = plan.effective_end_year();
    let years: Vec<i32> = (start_year..=end_year).collect();

    let mut warnings = Vec::new();
    for expense in &plan.major_expenses {
        if expense.is_in_installments && expense.installment_start_year < start_year {
            warn!(
                "installment window of major expense {} starts at {} before the horizon ({}); early payments are not projected",
                expense.id, expense.installment_start_year, start_year
            );
            warnings.push(ProjectionWarning::InstallmentBeforeHorizon {
                expense_id: expense.id.clone(),
            });
        }
    }

    let mut one_time_expenses = BTreeMap::new();
    let mut snapshots: Vec<YearSnapshot> = Vec::with_capacity(years.len());
    for (index, &year) in years.iter().enumerate() {
        let prev = index.checked_sub(1).map(|i| &snapshots[i]);
        let snap = project_year(plan, index, year, prev, &mut one_time_expenses, &mut warnings);
        snapshots.push(snap);
    }

    assemble_result(plan, years, snapshots, one_time_expenses, warnings)
}

/// Compute one year's snapshot from the previous year's committed snapshot
fn project_year(
    plan: &Plan,
    index: usize,
    year: i32,
    prev: Option<&YearSnapshot>,
    one_time_expenses: &mut BTreeMap<String, OneTimeCharge>,
    warnings: &mut Vec<ProjectionWarning>,
) -> YearSnapshot {
    let mut snap = YearSnapshot::zeroed(plan, index, year);

    income_step(plan, &mut snap, prev);
    expense_step(plan, &mut snap, prev);
    major_expense_step(plan, &mut snap, one_time_expenses);
    snap.commit_totals();

    match prev {
        // The opening year carries the declared balances untouched
        None => {
            for (j, asset) in plan.assets.iter().enumerate() {
                snap.asset_balances[j] = asset.current_amount;
            }
        }
        Some(prev) => asset_step(plan, &mut snap, prev, warnings),
    }
    snap.commit_net_worth();

    snap
}

/// Windowed growth rule shared by income and expense streams: the first
/// active year carries the declared amount, later contiguous active years
/// compound on the previous year's value, inactive years stay zero.
fn grown_stream_value(
    active: bool,
    first_active_year: bool,
    index: usize,
    annual_amount: f64,
    annual_growth: f64,
    prev_value: f64,
) -> f64 {
    if !active {
        return 0.0;
    }
    if index == 0 || first_active_year {
        annual_amount
    } else {
        prev_value * (1.0 + annual_growth / 100.0)
    }
}

fn income_step(plan: &Plan, snap: &mut YearSnapshot, prev: Option<&YearSnapshot>) {
    for (j, stream) in plan.income_streams.iter().enumerate() {
        snap.stream_incomes[j] = grown_stream_value(
            stream.is_active(snap.year),
            snap.year == stream.start_year,
            snap.index,
            stream.annual_amount,
            stream.annual_growth,
            prev.map_or(0.0, |p| p.stream_incomes[j]),
        );
    }
}

fn expense_step(plan: &Plan, snap: &mut YearSnapshot, prev: Option<&YearSnapshot>) {
    for (j, stream) in plan.expense_streams.iter().enumerate() {
        snap.stream_expenses[j] = grown_stream_value(
            stream.is_active(snap.year),
            snap.year == stream.start_year,
            snap.index,
            stream.annual_amount,
            stream.annual_growth,
            prev.map_or(0.0, |p| p.stream_expenses[j]),
        );
    }
}

/// Installments land in the snapshot at the plan's own year index, so a
/// window reaching outside the horizon is clamped rather than misindexed.
/// One-time expenses fire once and never enter the expense total.
fn major_expense_step(
    plan: &Plan,
    snap: &mut YearSnapshot,
    one_time_expenses: &mut BTreeMap<String, OneTimeCharge>,
) {
    for (j, expense) in plan.major_expenses.iter().enumerate() {
        if expense.is_in_installments {
            if expense.in_installment_window(snap.year) {
                snap.installments[j] = expense.annual_installment_amount;
            }
        } else if snap.year == expense.installment_start_year {
            one_time_expenses.insert(
                expense.id.clone(),
                OneTimeCharge {
                    year: snap.year,
                    amount: expense.total_amount,
                },
            );
        }
    }
}

/// Grow every balance, then allocate a surplus or burn a deficit
fn asset_step(
    plan: &Plan,
    snap: &mut YearSnapshot,
    prev: &YearSnapshot,
    warnings: &mut Vec<ProjectionWarning>,
) {
    for (j, asset) in plan.assets.iter().enumerate() {
        snap.asset_balances[j] = prev.asset_balances[j] * (1.0 + asset.annual_growth / 100.0);
    }

    if snap.savings > 0.0 {
        apply_surplus(plan, snap, warnings);
    } else if snap.savings < 0.0 {
        apply_burn(plan, snap, warnings);
    }
}

/// Spread a surplus across assets per the policy ladder. Distribution shares
/// are applied as declared, without renormalizing, and shares pointing at
/// deleted assets are skipped.
fn apply_surplus(plan: &Plan, snap: &mut YearSnapshot, warnings: &mut Vec<ProjectionWarning>) {
    match surplus_policy(plan, snap.year) {
        SurplusPolicy::Distribution(rule_index) => {
            let rule = &plan.savings_distributions[rule_index];
            for (asset_id, percentage) in &rule.distribution {
                match plan.asset_index(asset_id) {
                    Some(j) => snap.asset_balances[j] += snap.savings * percentage / 100.0,
                    None => {
                        warn!(
                            "distribution rule {} references deleted asset {}; share skipped",
                            rule.id, asset_id
                        );
                        warnings.push(ProjectionWarning::StaleAssetReference {
                            year: snap.year,
                            asset_id: asset_id.clone(),
                        });
                    }
                }
            }
        }
        SurplusPolicy::EvenSplit(flagged) => {
            let share = snap.savings / flagged.len() as f64;
            for j in flagged {
                snap.asset_balances[j] += share;
            }
        }
        SurplusPolicy::FirstAsset => snap.asset_balances[0] += snap.savings,
        SurplusPolicy::Unallocated => {
            warn!("year {}: surplus of {:.2} has no asset to land in", snap.year, snap.savings);
            warnings.push(ProjectionWarning::DroppedSurplus {
                year: snap.year,
                amount: snap.savings,
            });
        }
    }
}

/// Draw a deficit down from assets in spend-priority order, highest first,
/// ties keeping plan order. Balances floor at zero; whatever the assets
/// cannot absorb is dropped.
fn apply_burn(plan: &Plan, snap: &mut YearSnapshot, warnings: &mut Vec<ProjectionWarning>) {
    let mut order: Vec<usize> = (0..plan.assets.len()).collect();
    order.sort_by(|&a, &b| plan.assets[b].spend_priority.cmp(&plan.assets[a].spend_priority));

    let mut remaining = -snap.savings;
    for j in order {
        let available = snap.asset_balances[j];
        if available >= remaining {
            snap.asset_balances[j] -= remaining;
            remaining = 0.0;
            break;
        }
        remaining -= available;
        snap.asset_balances[j] = 0.0;
    }

    if remaining > 0.0 {
        warn!("year {}: deficit of {:.2} left unabsorbed after draining all assets", snap.year, remaining);
        warnings.push(ProjectionWarning::UnabsorbedDeficit {
            year: snap.year,
            amount: remaining,
        });
    }
}

/// Turn the committed snapshots into column-oriented output. Empty categories
/// get a synthetic all-zero column so consumers never see a degenerate shape.
fn assemble_result(
    plan: &Plan,
    years: Vec<i32>,
    snapshots: Vec<YearSnapshot>,
    one_time_expenses: BTreeMap<String, OneTimeCharge>,
    warnings: Vec<ProjectionWarning>,
) -> ProjectionResult {
    let len = years.len();
    let column = |extract: &dyn Fn(&YearSnapshot) -> f64| -> Vec<f64> {
        snapshots.iter().map(extract).collect()
    };

    let mut incomes: Vec<Series> = plan
        .income_streams
        .iter()
        .enumerate()
        .map(|(j, s)| Series::new(SeriesKey::Id(s.id.clone()), column(&|snap| snap.stream_incomes[j])))
        .collect();
    if incomes.is_empty() {
        incomes.push(Series::default_zeros(len));
    }

    let mut expenses: Vec<Series> = plan
        .expense_streams
        .iter()
        .enumerate()
        .map(|(j, s)| Series::new(SeriesKey::Id(s.id.clone()), column(&|snap| snap.stream_expenses[j])))
        .collect();
    for (j, expense) in plan.major_expenses.iter().enumerate() {
        let in_horizon = expense.installment_start_year <= years[len - 1]
            && expense.installment_end_year >= years[0];
        if expense.is_in_installments && in_horizon {
            expenses.push(Series::new(
                SeriesKey::Installment(expense.id.clone()),
                column(&|snap| snap.installments[j]),
            ));
        }
    }
    if expenses.is_empty() {
        expenses.push(Series::default_zeros(len));
    }

    let mut assets: Vec<Series> = plan
        .assets
        .iter()
        .enumerate()
        .map(|(j, a)| Series::new(SeriesKey::Id(a.id.clone()), column(&|snap| snap.asset_balances[j])))
        .collect();
    if assets.is_empty() {
        assets.push(Series::default_zeros(len));
    }

    ProjectionResult {
        years,
        incomes,
        expenses,
        one_time_expenses,
        assets,
        net_worth: column(&|snap| snap.net_worth),
        savings: column(&|snap| snap.savings),
        warnings,
    }
}
