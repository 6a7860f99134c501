//! Input boundary: raw borrower-entered values are parsed exactly once here.
//!
//! Form fields arrive as free text (or JSON numbers / nulls when driven
//! programmatically). Each field is classified into a [`FieldInput`] so the
//! validator and calculator never re-parse text or have to guess what an
//! empty string means.

use std::fmt;
use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::MortgageError;
use crate::types::{Money, PercentRate, Years};
use crate::validation::validate;

// ---------------------------------------------------------------------------
// Field identifiers
// ---------------------------------------------------------------------------

/// The four loan parameters, keyed the way the form and JSON payloads name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoanField {
    #[serde(rename = "loanAmount")]
    LoanAmount,
    #[serde(rename = "downPayment")]
    DownPayment,
    #[serde(rename = "interestRate")]
    InterestRate,
    #[serde(rename = "loanTerm")]
    LoanTerm,
}

impl LoanField {
    /// Key used in JSON payloads and error maps.
    pub fn key(self) -> &'static str {
        match self {
            LoanField::LoanAmount => "loanAmount",
            LoanField::DownPayment => "downPayment",
            LoanField::InterestRate => "interestRate",
            LoanField::LoanTerm => "loanTerm",
        }
    }

    /// Human-readable label, used at the start of error messages.
    pub fn label(self) -> &'static str {
        match self {
            LoanField::LoanAmount => "Loan amount",
            LoanField::DownPayment => "Down payment",
            LoanField::InterestRate => "Interest rate",
            LoanField::LoanTerm => "Loan term",
        }
    }
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// FieldInput
// ---------------------------------------------------------------------------

/// A single raw field after boundary parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldInput {
    /// Not supplied at all (absent key, JSON null, unset flag).
    #[default]
    Missing,
    /// Supplied but blank after trimming.
    Empty,
    /// Supplied text that is not a number.
    Malformed(String),
    Value(Decimal),
}

impl FieldInput {
    /// Classify free text. Accepts plain decimals ("6.5") and scientific
    /// notation ("3e5"); surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return FieldInput::Empty;
        }
        if let Ok(value) = Decimal::from_str(trimmed) {
            return FieldInput::Value(value);
        }
        if let Ok(value) = Decimal::from_scientific(trimmed) {
            return FieldInput::Value(value);
        }
        debug!("could not parse {trimmed:?} as a decimal");
        FieldInput::Malformed(trimmed.to_string())
    }

    /// The parsed number, if there is one.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            FieldInput::Value(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<Decimal> for FieldInput {
    fn from(value: Decimal) -> Self {
        FieldInput::Value(value)
    }
}

impl From<&str> for FieldInput {
    fn from(text: &str) -> Self {
        FieldInput::parse(text)
    }
}

impl From<Option<&str>> for FieldInput {
    fn from(text: Option<&str>) -> Self {
        text.map_or(FieldInput::Missing, FieldInput::parse)
    }
}

impl Serialize for FieldInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldInput::Missing => serializer.serialize_none(),
            FieldInput::Empty => serializer.serialize_str(""),
            FieldInput::Malformed(text) => serializer.serialize_str(text),
            FieldInput::Value(v) => serializer.serialize_str(&v.to_string()),
        }
    }
}

struct FieldInputVisitor;

impl<'de> Visitor<'de> for FieldInputVisitor {
    type Value = FieldInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string, or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldInput, E> {
        Ok(FieldInput::parse(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldInput, E> {
        Ok(FieldInput::Value(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldInput, E> {
        Ok(FieldInput::Value(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldInput, E> {
        // Shortest round-trip text keeps 6.5 as 6.5 rather than its binary expansion.
        Ok(FieldInput::parse(&v.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<FieldInput, E> {
        Ok(FieldInput::Missing)
    }

    fn visit_unit<E: de::Error>(self) -> Result<FieldInput, E> {
        Ok(FieldInput::Missing)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<FieldInput, D::Error> {
        deserializer.deserialize_any(FieldInputVisitor)
    }
}

impl<'de> Deserialize<'de> for FieldInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldInputVisitor)
    }
}

// ---------------------------------------------------------------------------
// Raw and validated inputs
// ---------------------------------------------------------------------------

/// The four loan parameters as entered, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLoanInputs {
    pub loan_amount: FieldInput,
    pub down_payment: FieldInput,
    /// Annual rate in percent.
    pub interest_rate: FieldInput,
    #[serde(alias = "loanTermYears")]
    pub loan_term: FieldInput,
}

impl RawLoanInputs {
    /// Build from four optional text values, e.g. form fields or CLI flags.
    pub fn from_text(
        loan_amount: Option<&str>,
        down_payment: Option<&str>,
        interest_rate: Option<&str>,
        loan_term: Option<&str>,
    ) -> Self {
        RawLoanInputs {
            loan_amount: loan_amount.into(),
            down_payment: down_payment.into(),
            interest_rate: interest_rate.into(),
            loan_term: loan_term.into(),
        }
    }

    pub fn field(&self, field: LoanField) -> &FieldInput {
        match field {
            LoanField::LoanAmount => &self.loan_amount,
            LoanField::DownPayment => &self.down_payment,
            LoanField::InterestRate => &self.interest_rate,
            LoanField::LoanTerm => &self.loan_term,
        }
    }
}

/// Parsed loan parameters. Only obtainable from raw input that passed
/// validation, or constructed directly by callers who own the precondition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInputs {
    /// Purchase price / amount before the down payment.
    pub loan_amount: Money,
    pub down_payment: Money,
    /// Annual nominal rate in percent (6.5 = 6.5%).
    pub interest_rate: PercentRate,
    pub loan_term_years: Years,
}

impl TryFrom<&RawLoanInputs> for LoanInputs {
    type Error = MortgageError;

    fn try_from(raw: &RawLoanInputs) -> Result<Self, Self::Error> {
        let validation = validate(raw);
        if !validation.is_valid {
            return Err(MortgageError::ValidationFailed(validation));
        }

        let required = |field: LoanField| {
            raw.field(field)
                .value()
                .ok_or_else(|| MortgageError::InvalidInput {
                    field: field.key().into(),
                    reason: "Value is required".into(),
                })
        };

        Ok(LoanInputs {
            loan_amount: required(LoanField::LoanAmount)?,
            down_payment: raw.down_payment.value().unwrap_or(Decimal::ZERO),
            interest_rate: required(LoanField::InterestRate)?,
            loan_term_years: required(LoanField::LoanTerm)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_classifies_text() {
        assert_eq!(FieldInput::parse("300000"), FieldInput::Value(dec!(300000)));
        assert_eq!(FieldInput::parse("  6.5 "), FieldInput::Value(dec!(6.5)));
        assert_eq!(FieldInput::parse("3e5"), FieldInput::Value(dec!(300000)));
        assert_eq!(FieldInput::parse(""), FieldInput::Empty);
        assert_eq!(FieldInput::parse("   "), FieldInput::Empty);
        assert_eq!(
            FieldInput::parse("abc"),
            FieldInput::Malformed("abc".to_string())
        );
    }

    #[test]
    fn test_deserialize_mixed_json() {
        let raw: RawLoanInputs = serde_json::from_str(
            r#"{"loanAmount": 300000, "downPayment": "", "interestRate": 6.5, "loanTerm": null}"#,
        )
        .unwrap();
        assert_eq!(raw.loan_amount, FieldInput::Value(dec!(300000)));
        assert_eq!(raw.down_payment, FieldInput::Empty);
        assert_eq!(raw.interest_rate, FieldInput::Value(dec!(6.5)));
        assert_eq!(raw.loan_term, FieldInput::Missing);
    }

    #[test]
    fn test_deserialize_absent_keys_are_missing() {
        let raw: RawLoanInputs =
            serde_json::from_str(r#"{"loanAmount": "1000", "loanTermYears": "5"}"#).unwrap();
        assert_eq!(raw.down_payment, FieldInput::Missing);
        assert_eq!(raw.interest_rate, FieldInput::Missing);
        assert_eq!(raw.loan_term, FieldInput::Value(dec!(5)));
    }

    #[test]
    fn test_deserialize_rejects_non_scalar() {
        let err = serde_json::from_str::<RawLoanInputs>(r#"{"loanAmount": [1, 2]}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_serialize_round_trips_text() {
        let raw = RawLoanInputs::from_text(Some("250000"), Some(""), Some("x"), None);
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "loanAmount": "250000",
                "downPayment": "",
                "interestRate": "x",
                "loanTerm": null
            })
        );
    }

    #[test]
    fn test_loan_inputs_defaults_missing_down_payment() {
        let raw = RawLoanInputs::from_text(Some("200000"), None, Some("5"), Some("15"));
        let inputs = LoanInputs::try_from(&raw).unwrap();
        assert_eq!(inputs.down_payment, Decimal::ZERO);
        assert_eq!(inputs.loan_term_years, dec!(15));
    }

    #[test]
    fn test_loan_inputs_rejects_invalid_raw() {
        let raw = RawLoanInputs::from_text(Some("0"), Some("0"), Some("5"), Some("15"));
        match LoanInputs::try_from(&raw) {
            Err(MortgageError::ValidationFailed(result)) => {
                assert!(result.errors.contains_key(&LoanField::LoanAmount));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
