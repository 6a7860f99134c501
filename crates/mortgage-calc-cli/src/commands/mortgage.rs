use clap::Args;
use serde_json::Value;

use mortgage_calc_core::calculator;
use mortgage_calc_core::input::RawLoanInputs;
use mortgage_calc_core::validation;

use crate::input;

/// Loan parameters, as typed into the calculator form.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Loan amount before the down payment (e.g. 300000)
    #[arg(long)]
    pub loan_amount: Option<String>,

    /// Down payment (e.g. 60000); omit for none
    #[arg(long)]
    pub down_payment: Option<String>,

    /// Annual interest rate in percent (e.g. 6.5 for 6.5%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<String>,

    /// Loan term in years (e.g. 30)
    #[arg(long, alias = "term")]
    pub loan_term: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl LoanArgs {
    fn has_flags(&self) -> bool {
        self.loan_amount.is_some()
            || self.down_payment.is_some()
            || self.interest_rate.is_some()
            || self.loan_term.is_some()
    }

    fn to_raw(&self) -> RawLoanInputs {
        RawLoanInputs::from_text(
            self.loan_amount.as_deref(),
            self.down_payment.as_deref(),
            self.interest_rate.as_deref(),
            self.loan_term.as_deref(),
        )
    }
}

/// Input file, then flags, then piped stdin. With none of them every field
/// is missing and validation reports what is needed.
fn resolve_inputs(args: &LoanArgs) -> Result<RawLoanInputs, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if args.has_flags() {
        return Ok(args.to_raw());
    }
    if let Some(raw) = input::stdin::read_stdin()? {
        return Ok(raw);
    }
    Ok(args.to_raw())
}

pub fn run_calculate(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = resolve_inputs(&args)?;
    let result = calculator::analyze_mortgage(&raw)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = resolve_inputs(&args)?;
    let result = validation::validate(&raw);
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_calc_core::MortgageError;
    use pretty_assertions::assert_eq;

    fn args(amount: &str, down: Option<&str>, rate: &str, term: &str) -> LoanArgs {
        LoanArgs {
            loan_amount: Some(amount.to_string()),
            down_payment: down.map(str::to_string),
            interest_rate: Some(rate.to_string()),
            loan_term: Some(term.to_string()),
            input: None,
        }
    }

    #[test]
    fn test_calculate_from_flags() {
        let value = run_calculate(args("300000", Some("60000"), "6.5", "30")).unwrap();
        assert_eq!(value["result"]["principal"], "240000.00");
        assert_eq!(value["result"]["monthlyPayment"], "1516.96");
    }

    #[test]
    fn test_calculate_rejects_invalid_flags() {
        let err = run_calculate(args("0", Some("10"), "150", "30")).unwrap_err();
        match err.downcast_ref::<MortgageError>() {
            Some(MortgageError::ValidationFailed(result)) => assert_eq!(result.errors.len(), 3),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_reports_fields() {
        let value = run_validate(args("100000", Some(""), "5", "abc")).unwrap();
        assert_eq!(value["isValid"], false);
        assert_eq!(value["errors"]["downPayment"], "Down payment cannot be negative");
        assert_eq!(value["errors"]["loanTerm"], "Loan term must be a valid number");
    }
}
