//! Field-level validation of loan parameters.
//!
//! Rules run in a fixed order and write into a map keyed by field, so a
//! later rule replaces an earlier message for the same field (the more
//! specific message wins: "cannot exceed 100%" over "must be 0 or greater",
//! "cannot exceed loan amount" over "cannot be negative").

use std::collections::BTreeMap;

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::input::{FieldInput, LoanField, RawLoanInputs};

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const LOAN_AMOUNT_NOT_POSITIVE: &str = "Loan amount must be greater than 0";
pub const DOWN_PAYMENT_NEGATIVE: &str = "Down payment cannot be negative";
pub const INTEREST_RATE_NEGATIVE: &str = "Interest rate must be 0 or greater";
pub const INTEREST_RATE_TOO_HIGH: &str = "Interest rate cannot exceed 100%";
pub const LOAN_TERM_NOT_POSITIVE: &str = "Loan term must be greater than 0";
pub const DOWN_PAYMENT_EXCEEDS_LOAN: &str = "Down payment cannot exceed loan amount";

/// Upper bound for the annual interest rate, in percent.
const MAX_INTEREST_RATE_PCT: Decimal = dec!(100);

/// Message for text that could not be parsed as a number.
pub fn not_a_number(field: LoanField) -> String {
    format!("{} must be a valid number", field.label())
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Outcome of [`validate`]. At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<LoanField, String>,
}

impl ValidationResult {
    fn from_errors(errors: BTreeMap<LoanField, String>) -> Self {
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn error(&self, field: LoanField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// One-line rendering: `loanAmount: ...; loanTerm: ...`.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check the four raw loan parameters. Never fails; problems are reported
/// only through the returned error map.
pub fn validate(raw: &RawLoanInputs) -> ValidationResult {
    let mut errors: BTreeMap<LoanField, String> = BTreeMap::new();

    // 1. Loan amount: required, strictly positive.
    match &raw.loan_amount {
        FieldInput::Value(v) if *v > Decimal::ZERO => {}
        FieldInput::Malformed(_) => {
            errors.insert(LoanField::LoanAmount, not_a_number(LoanField::LoanAmount));
        }
        _ => {
            errors.insert(LoanField::LoanAmount, LOAN_AMOUNT_NOT_POSITIVE.into());
        }
    }

    // 2. Down payment: may be omitted (treated as 0), but not blank or negative.
    match &raw.down_payment {
        FieldInput::Missing => {}
        FieldInput::Value(v) if *v >= Decimal::ZERO => {}
        FieldInput::Malformed(_) => {
            errors.insert(LoanField::DownPayment, not_a_number(LoanField::DownPayment));
        }
        _ => {
            errors.insert(LoanField::DownPayment, DOWN_PAYMENT_NEGATIVE.into());
        }
    }

    // 3. Interest rate: required, non-negative.
    match &raw.interest_rate {
        FieldInput::Value(v) if *v >= Decimal::ZERO => {}
        FieldInput::Malformed(_) => {
            errors.insert(LoanField::InterestRate, not_a_number(LoanField::InterestRate));
        }
        _ => {
            errors.insert(LoanField::InterestRate, INTEREST_RATE_NEGATIVE.into());
        }
    }

    // 4. Interest rate ceiling.
    if let Some(rate) = raw.interest_rate.value() {
        if rate > MAX_INTEREST_RATE_PCT {
            errors.insert(LoanField::InterestRate, INTEREST_RATE_TOO_HIGH.into());
        }
    }

    // 5. Loan term: required, strictly positive.
    match &raw.loan_term {
        FieldInput::Value(v) if *v > Decimal::ZERO => {}
        FieldInput::Malformed(_) => {
            errors.insert(LoanField::LoanTerm, not_a_number(LoanField::LoanTerm));
        }
        _ => {
            errors.insert(LoanField::LoanTerm, LOAN_TERM_NOT_POSITIVE.into());
        }
    }

    // 6. Down payment cannot exceed the loan amount.
    if let (Some(down), Some(amount)) = (raw.down_payment.value(), raw.loan_amount.value()) {
        if down > amount {
            errors.insert(LoanField::DownPayment, DOWN_PAYMENT_EXCEEDS_LOAN.into());
        }
    }

    let result = ValidationResult::from_errors(errors);
    if !result.is_valid {
        debug!("loan inputs rejected: {}", result.summary());
    }
    result
}
