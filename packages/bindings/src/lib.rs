use napi::Result as NapiResult;
use napi_derive::napi;

use mortgage_calc_core::{calculator, validation, LoanInputs, RawLoanInputs};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_raw(input_json: &str) -> NapiResult<RawLoanInputs> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

/// `{loanAmount, downPayment, interestRate, loanTerm}` -> `{isValid, errors}`.
/// Never throws for bad values, only for malformed JSON.
#[napi]
pub fn validate_inputs(input_json: String) -> NapiResult<String> {
    let raw = parse_raw(&input_json)?;
    let result = validation::validate(&raw);
    serde_json::to_string(&result).map_err(to_napi_error)
}

/// Calculate from inputs that already passed `validateInputs`.
#[napi]
pub fn calculate_monthly_payment(input_json: String) -> NapiResult<String> {
    let raw = parse_raw(&input_json)?;
    let inputs = LoanInputs::try_from(&raw).map_err(to_napi_error)?;
    let summary = calculator::calculate(&inputs).map_err(to_napi_error)?;
    serde_json::to_string(&summary).map_err(to_napi_error)
}

/// Validate and calculate in one call, returning the full computation envelope.
#[napi]
pub fn analyze_mortgage(input_json: String) -> NapiResult<String> {
    let raw = parse_raw(&input_json)?;
    let output = calculator::analyze_mortgage(&raw).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
