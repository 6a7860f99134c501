//! Presentation helpers for the single display currency (USD, en-US grouping).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculator::MortgageSummary;
use crate::types::{Money, Years};

/// Format an amount as US dollars: `$1,516.96`, `-$12.00`.
pub fn format_usd(amount: Money) -> String {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);

    let sign = if cents.is_sign_negative() && !cents.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = cents.abs().to_string();
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}${}.{frac}", group_thousands(whole))
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Closing sentence under the payment breakdown.
pub fn interest_headline(summary: &MortgageSummary, term_years: Option<Years>) -> String {
    let over = match term_years {
        Some(years) if years == Decimal::ONE => "1 year".to_string(),
        Some(years) => format!("{} years", years.normalize()),
        None => "the loan term".to_string(),
    };
    format!(
        "Over {over}, you'll pay {} in interest",
        format_usd(summary.total_interest)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd_grouping() {
        assert_eq!(format_usd(dec!(0)), "$0.00");
        assert_eq!(format_usd(dec!(999.5)), "$999.50");
        assert_eq!(format_usd(dec!(1516.96)), "$1,516.96");
        assert_eq!(format_usd(dec!(240000)), "$240,000.00");
        assert_eq!(format_usd(dec!(12000000)), "$12,000,000.00");
    }

    #[test]
    fn test_format_usd_rounds_and_signs() {
        assert_eq!(format_usd(dec!(1234.565)), "$1,234.57");
        assert_eq!(format_usd(dec!(-12)), "-$12.00");
        assert_eq!(format_usd(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_interest_headline() {
        let summary = MortgageSummary {
            principal: dec!(240000.00),
            monthly_payment: dec!(1516.96),
            total_payment: dec!(546106.77),
            total_interest: dec!(306106.77),
        };
        assert_eq!(
            interest_headline(&summary, Some(dec!(30))),
            "Over 30 years, you'll pay $306,106.77 in interest"
        );
        assert_eq!(
            interest_headline(&summary, Some(dec!(1))),
            "Over 1 year, you'll pay $306,106.77 in interest"
        );
        assert_eq!(
            interest_headline(&summary, None),
            "Over the loan term, you'll pay $306,106.77 in interest"
        );
    }
}
