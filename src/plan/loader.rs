//! Load plan snapshots from JSON files

use super::Plan;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Failure while reading or parsing a plan snapshot
#[derive(Debug, Error)]
pub enum PlanLoadError {
    #[error("failed to read plan file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse plan snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a plan snapshot from a JSON file
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<Plan, PlanLoadError> {
    let file = File::open(path)?;
    load_plan_from_reader(BufReader::new(file))
}

/// Load a plan snapshot from any reader (e.g. string buffer, network stream)
pub fn load_plan_from_reader<R: Read>(reader: R) -> Result<Plan, PlanLoadError> {
    let plan = serde_json::from_reader(reader)?;
    Ok(plan)
}

/// Serialize a plan back into the snapshot format
pub fn plan_to_json(plan: &Plan) -> Result<String, PlanLoadError> {
    let json = serde_json::to_string_pretty(plan)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "startYear": 2025,
        "endYear": 2035,
        "userAge": 30,
        "birthYear": 1995,
        "incomeStreams": [
            {
                "id": "salary",
                "name": "Salary",
                "startYear": 2025,
                "endYear": 2035,
                "annualAmount": 60000,
                "annualGrowth": 3
            }
        ],
        "expenseStreams": [],
        "majorExpenses": [
            {
                "id": "car",
                "name": "Car",
                "totalAmount": 30000,
                "isInInstallments": true,
                "annualInstallmentAmount": 6900,
                "installmentStartYear": 2026,
                "installmentEndYear": 2030,
                "annualInterest": 5
            }
        ],
        "assets": [
            {
                "id": "cash",
                "type": "Cash & Equivalents",
                "name": "Checking",
                "currentAmount": 15000,
                "annualGrowth": 0.5,
                "spendPriority": 10,
                "isForSavings": true
            }
        ],
        "savingsDistributions": [
            {
                "id": "d1",
                "startYear": 2025,
                "endYear": 2035,
                "distribution": { "cash": 100 }
            }
        ]
    }"#;

    #[test]
    fn test_load_snapshot() {
        let plan = load_plan_from_reader(SNAPSHOT.as_bytes()).unwrap();

        assert_eq!(plan.start_year, 2025);
        assert_eq!(plan.income_streams.len(), 1);
        assert_eq!(plan.income_streams[0].annual_amount, 60_000.0);
        assert!(plan.major_expenses[0].is_in_installments);
        assert_eq!(plan.assets[0].spend_priority, 10);
        assert_eq!(plan.savings_distributions[0].distribution["cash"], 100.0);
    }

    #[test]
    fn test_roundtrip() {
        let plan = load_plan_from_reader(SNAPSHOT.as_bytes()).unwrap();
        let json = plan_to_json(&plan).unwrap();
        let reparsed = load_plan_from_reader(json.as_bytes()).unwrap();

        assert_eq!(reparsed.end_year, plan.end_year);
        assert_eq!(reparsed.major_expenses[0].annual_installment_amount, 6900.0);
    }

    #[test]
    fn test_parse_error_is_typed() {
        let err = load_plan_from_reader("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, PlanLoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_plan("/nonexistent/plan.json").unwrap_err();
        assert!(matches!(err, PlanLoadError::Io(_)));
    }
}
