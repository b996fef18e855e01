//! Editor-side plan validation
//!
//! The engine tolerates everything reported here; these checks exist so the
//! plan editor can flag problems before they silently shape the projection.

use super::{Plan, SavingsDistribution};
use std::collections::BTreeSet;
use thiserror::Error;

/// Tolerance when checking that distribution percentages sum to 100
const PERCENTAGE_TOLERANCE: f64 = 0.01;

/// An advisory problem found in a plan
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanIssue {
    #[error("end year {end_year} is before start year {start_year}")]
    ReversedHorizon { start_year: i32, end_year: i32 },

    #[error("duplicate id {id:?} across plan entities")]
    DuplicateId { id: String },

    #[error("distribution rule {rule_id:?} percentages sum to {total} instead of 100")]
    DistributionSum { rule_id: String, total: f64 },

    #[error("distribution rules leave years of the horizon uncovered")]
    DistributionGaps,

    #[error("distribution rule {rule_id:?} references missing asset {asset_id:?}")]
    StaleAssetReference { rule_id: String, asset_id: String },

    #[error("asset {asset_id:?} has spend priority {value} outside 1-10")]
    SpendPriorityOutOfRange { asset_id: String, value: u8 },
}

/// Check whether the distribution rules cover every year of the horizon
/// with no gaps between consecutive rules
pub fn distributions_cover_horizon(
    start_year: i32,
    end_year: i32,
    distributions: &[SavingsDistribution],
) -> bool {
    if distributions.is_empty() {
        return false;
    }

    let mut sorted: Vec<&SavingsDistribution> = distributions.iter().collect();
    sorted.sort_by_key(|d| d.start_year);

    if sorted[0].start_year > start_year {
        return false;
    }
    if sorted[sorted.len() - 1].end_year < end_year {
        return false;
    }
    for pair in sorted.windows(2) {
        if pair[0].end_year + 1 != pair[1].start_year {
            return false;
        }
    }

    true
}

/// Check whether a rule's percentage shares sum to 100 within tolerance
pub fn distribution_sums_to_100(rule: &SavingsDistribution) -> bool {
    (rule.percentage_total() - 100.0).abs() < PERCENTAGE_TOLERANCE
}

/// Run all advisory checks against a plan
pub fn check_plan(plan: &Plan) -> Vec<PlanIssue> {
    let mut issues = Vec::new();

    if plan.end_year < plan.start_year {
        issues.push(PlanIssue::ReversedHorizon {
            start_year: plan.start_year,
            end_year: plan.end_year,
        });
    }

    let mut seen = BTreeSet::new();
    let all_ids = plan
        .income_streams
        .iter()
        .map(|s| &s.id)
        .chain(plan.expense_streams.iter().map(|s| &s.id))
        .chain(plan.major_expenses.iter().map(|e| &e.id))
        .chain(plan.assets.iter().map(|a| &a.id))
        .chain(plan.savings_distributions.iter().map(|d| &d.id));
    for id in all_ids {
        if !seen.insert(id.clone()) {
            issues.push(PlanIssue::DuplicateId { id: id.clone() });
        }
    }

    for rule in &plan.savings_distributions {
        if !rule.distribution.is_empty() && !distribution_sums_to_100(rule) {
            issues.push(PlanIssue::DistributionSum {
                rule_id: rule.id.clone(),
                total: rule.percentage_total(),
            });
        }
        for asset_id in rule.distribution.keys() {
            if plan.asset_index(asset_id).is_none() {
                issues.push(PlanIssue::StaleAssetReference {
                    rule_id: rule.id.clone(),
                    asset_id: asset_id.clone(),
                });
            }
        }
    }

    if !plan.savings_distributions.is_empty()
        && !distributions_cover_horizon(
            plan.start_year,
            plan.effective_end_year(),
            &plan.savings_distributions,
        )
    {
        issues.push(PlanIssue::DistributionGaps);
    }

    for asset in &plan.assets {
        if asset.spend_priority < 1 || asset.spend_priority > 10 {
            issues.push(PlanIssue::SpendPriorityOutOfRange {
                asset_id: asset.id.clone(),
                value: asset.spend_priority,
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Asset, AssetKind};
    use std::collections::BTreeMap;

    fn rule(id: &str, start: i32, end: i32, shares: &[(&str, f64)]) -> SavingsDistribution {
        SavingsDistribution {
            id: id.to_string(),
            start_year: start,
            end_year: end,
            distribution: shares
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn asset(id: &str, priority: u8) -> Asset {
        Asset {
            id: id.to_string(),
            kind: AssetKind::Cash,
            name: id.to_string(),
            current_amount: 0.0,
            annual_growth: 0.0,
            spend_priority: priority,
            is_for_savings: false,
        }
    }

    #[test]
    fn test_coverage_requires_contiguous_windows() {
        let rules = vec![
            rule("a", 2025, 2029, &[]),
            rule("b", 2030, 2040, &[]),
        ];
        assert!(distributions_cover_horizon(2025, 2040, &rules));

        let gappy = vec![
            rule("a", 2025, 2028, &[]),
            rule("b", 2030, 2040, &[]),
        ];
        assert!(!distributions_cover_horizon(2025, 2040, &gappy));

        assert!(!distributions_cover_horizon(2025, 2040, &[]));
        assert!(!distributions_cover_horizon(2025, 2040, &[rule("a", 2026, 2040, &[])]));
    }

    #[test]
    fn test_percentage_sum_tolerance() {
        assert!(distribution_sums_to_100(&rule("a", 2025, 2030, &[("x", 60.0), ("y", 40.0)])));
        assert!(distribution_sums_to_100(&rule("a", 2025, 2030, &[("x", 99.995)])));
        assert!(!distribution_sums_to_100(&rule("a", 2025, 2030, &[("x", 90.0)])));
    }

    #[test]
    fn test_check_plan_reports_issues() {
        let mut plan = Plan::new(30);
        plan.start_year = 2030;
        plan.end_year = 2025;
        plan.assets.push(asset("cash", 11));
        plan.assets.push(asset("cash", 5));
        plan.savings_distributions
            .push(rule("d1", 2025, 2030, &[("gone", 80.0)]));

        let issues = check_plan(&plan);

        assert!(issues.contains(&PlanIssue::ReversedHorizon { start_year: 2030, end_year: 2025 }));
        assert!(issues.contains(&PlanIssue::DuplicateId { id: "cash".to_string() }));
        assert!(issues.contains(&PlanIssue::DistributionSum { rule_id: "d1".to_string(), total: 80.0 }));
        assert!(issues.contains(&PlanIssue::StaleAssetReference {
            rule_id: "d1".to_string(),
            asset_id: "gone".to_string(),
        }));
        assert!(issues.contains(&PlanIssue::SpendPriorityOutOfRange {
            asset_id: "cash".to_string(),
            value: 11,
        }));
    }

    #[test]
    fn test_clean_plan_has_no_issues() {
        let mut plan = Plan::new(30);
        plan.assets.push(asset("cash", 10));
        plan.savings_distributions.push(rule(
            "d1",
            plan.start_year,
            plan.end_year,
            &[("cash", 100.0)],
        ));

        assert!(check_plan(&plan).is_empty());
    }
}
