use serde_json::Value;
use std::io::{self, Write};

use super::{format_scalar, SUMMARY_FIELDS};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_csv<W: Write>(out: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                // Summary fields first, in display order
                wtr.write_record(["field", "value"])?;
                for (key, _) in SUMMARY_FIELDS {
                    if let Some(val) = result.get(key) {
                        let cell = format_scalar(val);
                        wtr.write_record([key, cell.as_str()])?;
                    }
                }
                for (key, val) in result {
                    if !SUMMARY_FIELDS.iter().any(|(k, _)| *k == key.as_str()) {
                        let cell = format_scalar(val);
                        wtr.write_record([key.as_str(), cell.as_str()])?;
                    }
                }
            } else if let Some(Value::Object(errors)) = map.get("errors") {
                wtr.write_record(["field", "message"])?;
                for (field, msg) in errors {
                    let cell = format_scalar(msg);
                    wtr.write_record([field.as_str(), cell.as_str()])?;
                }
            } else {
                wtr.write_record(["field", "value"])?;
                for (key, val) in map {
                    let cell = format_scalar(val);
                    wtr.write_record([key.as_str(), cell.as_str()])?;
                }
            }
        }
        _ => {
            wtr.write_record([format_scalar(value)])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_summary_rows_in_display_order() {
        let value = json!({
            "result": {
                "principal": "240000.00",
                "monthlyPayment": "1516.96",
                "totalPayment": "546106.77",
                "totalInterest": "306106.77"
            },
            "warnings": []
        });
        assert_eq!(
            render(&value),
            "field,value\n\
             monthlyPayment,1516.96\n\
             principal,240000.00\n\
             totalPayment,546106.77\n\
             totalInterest,306106.77\n"
        );
    }

    #[test]
    fn test_validation_rows() {
        let value = json!({
            "isValid": false,
            "errors": {"interestRate": "Interest rate cannot exceed 100%"}
        });
        assert_eq!(
            render(&value),
            "field,message\ninterestRate,Interest rate cannot exceed 100%\n"
        );
    }
}
