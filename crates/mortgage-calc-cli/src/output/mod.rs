pub mod csv_out;
pub mod minimal;
pub mod table;

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::preferences::Theme;
use crate::OutputFormat;

/// Summary fields in display order, with the labels the result card uses.
pub const SUMMARY_FIELDS: [(&str, &str); 4] = [
    ("monthlyPayment", "Monthly Payment"),
    ("principal", "Principal Amount"),
    ("totalPayment", "Total Payment"),
    ("totalInterest", "Total Interest"),
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value, theme: Theme) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value, theme),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-print JSON to stdout.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Decimals travel as JSON strings; accept bare numbers too.
pub fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_as_decimal() {
        assert_eq!(as_decimal(&json!("1516.96")), Some(dec!(1516.96)));
        assert_eq!(as_decimal(&json!(30)), Some(dec!(30)));
        assert_eq!(as_decimal(&json!("n/a")), None);
        assert_eq!(as_decimal(&Value::Null), None);
    }
}
