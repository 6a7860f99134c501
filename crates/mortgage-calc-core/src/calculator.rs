//! Level-payment mortgage calculation.
//!
//! Standard amortization: M = P * r * (1+r)^n / ((1+r)^n - 1), with
//! r = annual% / 100 / 12 and n = years * 12. A 0% rate degenerates to
//! straight-line repayment P / n. All math in `rust_decimal::Decimal`;
//! results are rounded to cents only at the very end.

use std::time::Instant;

use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::input::{LoanInputs, RawLoanInputs};
use crate::types::{with_metadata, ComputationOutput, Money, PercentRate, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Display precision for every summary figure.
const CENTS_DP: u32 = 2;

/// Rates at or above this (in percent) trigger a reasonableness warning.
const HIGH_RATE_WARNING_PCT: Decimal = dec!(30);

/// Nonzero rates below this (in percent) look like a fraction typed instead of a percent.
const FRACTION_RATE_WARNING_PCT: Decimal = dec!(1);

/// Longest term offered on the input form.
const MAX_CUSTOMARY_TERM_YEARS: Decimal = dec!(50);

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Payment summary, every figure rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageSummary {
    /// Loan amount less down payment: the amount actually financed.
    pub principal: Money,
    pub monthly_payment: Money,
    /// Monthly payment times number of months.
    pub total_payment: Money,
    /// Total payment less principal; exactly zero for a 0% loan.
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert an annual percentage rate to a monthly decimal rate (6.5 -> 0.0054166...).
pub fn monthly_rate(annual_pct: PercentRate) -> Rate {
    annual_pct / PERCENT / MONTHS_PER_YEAR
}

/// Compute the payment summary for already-validated inputs.
///
/// Out-of-contract inputs are reported as errors rather than producing
/// meaningless figures: a non-positive term is a [`MortgageError::DivisionByZero`],
/// a negative principal or rate is a [`MortgageError::InvalidInput`], and a
/// figure beyond the `Decimal` range is a [`MortgageError::Overflow`].
pub fn calculate(inputs: &LoanInputs) -> MortgageResult<MortgageSummary> {
    let principal = inputs
        .loan_amount
        .checked_sub(inputs.down_payment)
        .ok_or_else(|| {
            overflow(format!(
                "principal of {} less {}",
                inputs.loan_amount, inputs.down_payment
            ))
        })?;
    let months = inputs
        .loan_term_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| {
            overflow(format!(
                "month count for a {}-year term",
                inputs.loan_term_years
            ))
        })?;

    if months <= Decimal::ZERO {
        warn!("calculate called with non-positive term {}", inputs.loan_term_years);
        return Err(MortgageError::DivisionByZero {
            context: format!(
                "monthly payment over {} months (loan term {} years)",
                months, inputs.loan_term_years
            ),
        });
    }
    if principal < Decimal::ZERO {
        warn!("calculate called with negative principal {principal}");
        return Err(MortgageError::InvalidInput {
            field: "downPayment".into(),
            reason: format!(
                "Down payment {} exceeds loan amount {}",
                inputs.down_payment, inputs.loan_amount
            ),
        });
    }
    if inputs.interest_rate < Decimal::ZERO {
        warn!("calculate called with negative rate {}", inputs.interest_rate);
        return Err(MortgageError::InvalidInput {
            field: "interestRate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    // A positive rate can still be too small to survive the monthly division.
    let r = monthly_rate(inputs.interest_rate);
    if r.is_zero() {
        debug!("zero-rate loan: straight-line repayment over {months} months");
        return Ok(MortgageSummary {
            principal: to_cents(principal),
            monthly_payment: to_cents(straight_line(principal, months)?),
            total_payment: to_cents(principal),
            total_interest: to_cents(Decimal::ZERO),
        });
    }

    let monthly_payment = level_payment(principal, r, months)?;
    let total_payment = monthly_payment
        .checked_mul(months)
        .ok_or_else(|| overflow(format!("total of {monthly_payment} over {months} months")))?;
    let total_interest = total_payment - principal;

    debug!(
        "amortized {principal} at {r} per month over {months} months: payment {monthly_payment}"
    );

    Ok(MortgageSummary {
        principal: to_cents(principal),
        monthly_payment: to_cents(monthly_payment),
        total_payment: to_cents(total_payment),
        total_interest: to_cents(total_interest),
    })
}

/// Validate raw inputs, then calculate, wrapping the result in the standard
/// computation envelope with reasonableness warnings.
///
/// Fails with [`MortgageError::ValidationFailed`] carrying every field error
/// when the inputs do not validate; the calculator is not run in that case.
pub fn analyze_mortgage(
    raw: &RawLoanInputs,
) -> MortgageResult<ComputationOutput<MortgageSummary>> {
    let start = Instant::now();

    let inputs = LoanInputs::try_from(raw)?;
    let summary = calculate(&inputs)?;
    let warnings = reasonableness_warnings(&inputs, &summary);

    let methodology = if monthly_rate(inputs.interest_rate).is_zero() {
        "Straight-line repayment (0% interest)"
    } else {
        "Level-payment amortization, monthly compounding"
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(methodology, &inputs, warnings, elapsed, summary))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Level monthly payment for a positive monthly rate.
///
/// Uses the algebraically identical form P * r / (1 - (1+r)^-n) so that
/// large growth factors never multiply against the principal.
fn level_payment(principal: Money, r: Rate, months: Decimal) -> MortgageResult<Money> {
    let discount = discount_factor(Decimal::ONE + r, months);
    let annuity = Decimal::ONE - discount;

    if annuity.is_zero() {
        debug!("annuity factor vanished at monthly rate {r}; repaying straight-line");
        return straight_line(principal, months);
    }

    principal
        .checked_mul(r)
        .and_then(|interest| interest.checked_div(annuity))
        .ok_or_else(|| overflow(format!("monthly payment on {principal} over {months} months")))
}

fn straight_line(principal: Money, months: Decimal) -> MortgageResult<Money> {
    principal
        .checked_div(months)
        .ok_or_else(|| overflow(format!("monthly payment on {principal} over {months} months")))
}

fn overflow(context: String) -> MortgageError {
    warn!("arithmetic overflow in {context}");
    MortgageError::Overflow { context }
}

/// (1+r)^-n. Whole months use an exact integer power; fractional terms fall
/// back to a decimal power. A growth factor beyond the Decimal range
/// discounts to zero.
fn discount_factor(one_plus_r: Decimal, months: Decimal) -> Decimal {
    let growth = if months.fract().is_zero() {
        months
            .to_i64()
            .and_then(|n| one_plus_r.checked_powi(n))
    } else {
        one_plus_r.checked_powd(months)
    };

    match growth {
        Some(g) if !g.is_zero() => Decimal::ONE / g,
        _ => {
            debug!("growth factor {one_plus_r}^{months} out of range; discounting to zero");
            Decimal::ZERO
        }
    }
}

/// Round half away from zero and pin the scale, so 240000 renders as "240000.00".
fn to_cents(value: Decimal) -> Decimal {
    let mut cents = value.round_dp_with_strategy(CENTS_DP, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(CENTS_DP);
    cents
}

fn reasonableness_warnings(inputs: &LoanInputs, summary: &MortgageSummary) -> Vec<String> {
    let mut warnings = Vec::new();

    if inputs.interest_rate.is_zero() {
        warnings.push("Zero-interest loan: payments repay principal only".into());
    } else if inputs.interest_rate < FRACTION_RATE_WARNING_PCT {
        warnings.push(format!(
            "Interest rate of {}% is below 1%; rates are entered in percent (6.5 = 6.5%)",
            inputs.interest_rate
        ));
    } else if inputs.interest_rate >= HIGH_RATE_WARNING_PCT {
        warnings.push(format!(
            "Interest rate of {}% is unusually high for a mortgage; verify the annual rate",
            inputs.interest_rate
        ));
    }

    if summary.principal.is_zero() {
        warnings.push("Down payment covers the full loan amount; nothing is financed".into());
    }

    if inputs.loan_term_years > MAX_CUSTOMARY_TERM_YEARS {
        warnings.push(format!(
            "Loan term of {} years exceeds the customary {MAX_CUSTOMARY_TERM_YEARS}-year maximum",
            inputs.loan_term_years
        ));
    }

    warnings
}
