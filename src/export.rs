//! CSV export of projection results
//!
//! Columns follow plan collection order: the year, every income column,
//! every expense column (streams first, then installments), every asset
//! column, then net worth and savings. Monetary values carry exactly two
//! decimals and fields are never quoted, matching the planner's download
//! format.

use crate::projection::ProjectionResult;
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;
use thiserror::Error;

/// Failure while writing a projection as CSV
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Write a projection as CSV to any writer
pub fn write_csv<W: Write>(result: &ProjectionResult, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    let mut header = vec!["Year".to_string()];
    header.extend(result.incomes.iter().map(|s| format!("Income: {}", s.key.label())));
    header.extend(result.expenses.iter().map(|s| format!("Expense: {}", s.key.label())));
    header.extend(result.assets.iter().map(|s| format!("Asset: {}", s.key.label())));
    header.push("Net Worth".to_string());
    header.push("Savings".to_string());
    csv_writer.write_record(&header)?;

    for (i, year) in result.years.iter().enumerate() {
        let mut row = vec![year.to_string()];
        let columns = result
            .incomes
            .iter()
            .chain(result.expenses.iter())
            .chain(result.assets.iter());
        for series in columns {
            row.push(format!("{:.2}", series.values[i]));
        }
        row.push(format!("{:.2}", result.net_worth[i]));
        row.push(format!("{:.2}", result.savings[i]));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render a projection as a CSV string
pub fn to_csv_string(result: &ProjectionResult) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(result, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Asset, AssetKind, IncomeStream, Plan};
    use crate::projection::project;

    fn sample_plan() -> Plan {
        let mut plan = Plan::new(30);
        plan.start_year = 2025;
        plan.end_year = 2029;
        plan.income_streams.push(IncomeStream {
            id: "salary".to_string(),
            name: "Salary".to_string(),
            start_year: 2025,
            end_year: 2029,
            annual_amount: 48_000.0,
            annual_growth: 2.5,
        });
        plan.assets.push(Asset {
            id: "cash".to_string(),
            kind: AssetKind::Cash,
            name: "Checking".to_string(),
            current_amount: 5_000.0,
            annual_growth: 0.5,
            spend_priority: 10,
            is_for_savings: true,
        });
        plan
    }

    #[test]
    fn test_header_and_shape() {
        let result = project(&sample_plan());
        let csv = to_csv_string(&result).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Year,Income: salary,Expense: default,Asset: cash,Net Worth,Savings"
        );
        assert_eq!(csv.lines().count(), 6); // header + five years
        assert!(lines.next().unwrap().starts_with("2025,48000.00,0.00,5000.00,"));
    }

    #[test]
    fn test_values_have_two_decimals() {
        let result = project(&sample_plan());
        let csv = to_csv_string(&result).unwrap();

        for line in csv.lines().skip(1) {
            for field in line.split(',').skip(1) {
                let (_, decimals) = field.split_once('.').unwrap();
                assert_eq!(decimals.len(), 2, "field {:?} not two-decimal", field);
            }
        }
    }

    #[test]
    fn test_roundtrip_within_a_cent() {
        let result = project(&sample_plan());
        let csv = to_csv_string(&result).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        for (i, record) in reader.records().enumerate() {
            let record = record.unwrap();
            let year: i32 = record[0].parse().unwrap();
            assert_eq!(year, result.years[i]);

            let reparsed: Vec<f64> = record.iter().skip(1).map(|f| f.parse().unwrap()).collect();
            let expected = [
                result.incomes[0].values[i],
                result.expenses[0].values[i],
                result.assets[0].values[i],
                result.net_worth[i],
                result.savings[i],
            ];
            for (got, want) in reparsed.iter().zip(expected.iter()) {
                assert!((got - want).abs() <= 0.01, "{} vs {}", got, want);
            }
        }
    }
}
