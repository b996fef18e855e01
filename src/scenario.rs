//! Scenario runner for batch projections
//!
//! Holds a base plan and projects variations of it without touching the
//! engine's single-call contract. Batches run across independent plans in
//! parallel; each individual projection stays synchronous.

use crate::plan::Plan;
use crate::projection::{project, ProjectionResult};
use rayon::prelude::*;

/// Batch front-end over the projection engine
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(plan);
/// let base = runner.run();
/// let pessimistic = runner.run_with_growth_shift(-2.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_plan: Plan,
}

impl ScenarioRunner {
    /// Create a runner around a base plan
    pub fn new(base_plan: Plan) -> Self {
        Self { base_plan }
    }

    /// Project the base plan unchanged
    pub fn run(&self) -> ProjectionResult {
        project(&self.base_plan)
    }

    /// Project a copy of the base plan with every asset's annual growth
    /// shifted by `shift` percentage points
    pub fn run_with_growth_shift(&self, shift: f64) -> ProjectionResult {
        let mut plan = self.base_plan.clone();
        for asset in &mut plan.assets {
            asset.annual_growth += shift;
        }
        project(&plan)
    }

    /// Project one result per growth shift, in parallel
    pub fn run_growth_sweep(&self, shifts: &[f64]) -> Vec<ProjectionResult> {
        shifts
            .par_iter()
            .map(|&shift| self.run_with_growth_shift(shift))
            .collect()
    }

    /// Project many independent plans in parallel
    pub fn run_batch(plans: &[Plan]) -> Vec<ProjectionResult> {
        plans.par_iter().map(project).collect()
    }

    /// Get reference to the base plan
    pub fn plan(&self) -> &Plan {
        &self.base_plan
    }

    /// Get mutable reference to the base plan for customization
    pub fn plan_mut(&mut self) -> &mut Plan {
        &mut self.base_plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Asset, AssetKind, IncomeStream};

    fn test_plan() -> Plan {
        let mut plan = Plan::new(30);
        plan.start_year = 2025;
        plan.end_year = 2045;
        plan.income_streams.push(IncomeStream {
            id: "salary".to_string(),
            name: "Salary".to_string(),
            start_year: 2025,
            end_year: 2045,
            annual_amount: 50_000.0,
            annual_growth: 2.0,
        });
        plan.assets.push(Asset {
            id: "stocks".to_string(),
            kind: AssetKind::Stocks,
            name: "Index fund".to_string(),
            current_amount: 100_000.0,
            annual_growth: 6.0,
            spend_priority: 5,
            is_for_savings: true,
        });
        plan
    }

    #[test]
    fn test_growth_sweep_is_monotonic() {
        let runner = ScenarioRunner::new(test_plan());
        let results = runner.run_growth_sweep(&[-2.0, 0.0, 2.0]);

        assert_eq!(results.len(), 3);
        let finals: Vec<f64> = results.iter().map(|r| r.summary().final_net_worth).collect();
        assert!(finals[0] < finals[1]);
        assert!(finals[1] < finals[2]);
    }

    #[test]
    fn test_zero_shift_matches_base_run() {
        let runner = ScenarioRunner::new(test_plan());
        let base = runner.run();
        let shifted = runner.run_with_growth_shift(0.0);

        assert_eq!(base.net_worth, shifted.net_worth);
    }

    #[test]
    fn test_batch_preserves_order() {
        let mut other = test_plan();
        other.assets[0].current_amount = 1.0;
        let results = ScenarioRunner::run_batch(&[test_plan(), other]);

        assert_eq!(results.len(), 2);
        assert!(results[0].net_worth[0] > results[1].net_worth[0]);
    }
}
