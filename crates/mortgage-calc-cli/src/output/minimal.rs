use serde_json::Value;

use super::format_scalar;

/// Print just the key answer value from the output.
///
/// Calculations print the monthly payment, validations print `valid` or
/// one `field: message` line per error, anything else its first field.
pub fn print_minimal(value: &Value) {
    for line in minimal_lines(value) {
        println!("{}", line);
    }
}

fn minimal_lines(value: &Value) -> Vec<String> {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return vec![format_scalar(result_obj)];
    };

    if let Some(payment) = map.get("monthlyPayment") {
        return vec![format_scalar(payment)];
    }

    if let Some(Value::Bool(valid)) = map.get("isValid") {
        if *valid {
            return vec!["valid".to_string()];
        }
        if let Some(Value::Object(errors)) = map.get("errors") {
            return errors
                .iter()
                .map(|(field, msg)| format!("{}: {}", field, format_scalar(msg)))
                .collect();
        }
    }

    if let Some(theme) = map.get("theme") {
        return vec![format_scalar(theme)];
    }

    map.iter()
        .next()
        .map(|(key, val)| vec![format!("{}: {}", key, format_scalar(val))])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_calculation_prints_payment() {
        let value = json!({"result": {"principal": "240000.00", "monthlyPayment": "1516.96"}});
        assert_eq!(minimal_lines(&value), vec!["1516.96"]);
    }

    #[test]
    fn test_validation_lines() {
        let value = json!({
            "isValid": false,
            "errors": {"loanTerm": "Loan term must be greater than 0"}
        });
        assert_eq!(
            minimal_lines(&value),
            vec!["loanTerm: Loan term must be greater than 0"]
        );
        assert_eq!(minimal_lines(&json!({"isValid": true, "errors": {}})), vec!["valid"]);
    }
}
