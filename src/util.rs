//! Console formatting helpers

/// Format a monetary amount with thousands separators and no cents,
/// e.g. `-$12,345`
pub fn format_currency(value: f64) -> String {
    let rounded = value.abs().round() as i64;

    let digits = rounded.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if value < 0.0 && rounded != 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a percentage given in percent units, e.g. `7.5` -> `7.5%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1234.6), "$1,235");
        assert_eq!(format_currency(12_345_678.0), "$12,345,678");
        assert_eq!(format_currency(-12_345.0), "-$12,345");
        assert_eq!(format_currency(-0.2), "$0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(7.55), "7.5%");
        assert_eq!(format_percent(-2.0), "-2.0%");
    }
}
