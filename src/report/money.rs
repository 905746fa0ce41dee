use rust_decimal::{Decimal, RoundingStrategy};

/// Format a USD amount as `$1,234.56`.
///
/// Rounds to cents half away from zero. Negative amounts get a leading `-`.
///
/// # Examples
///
/// ```
/// use settlement_reports::report::money::format_usd;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_usd(dec!(24924.5)), "$24,924.50");
/// assert_eq!(format_usd(dec!(0)), "$0.00");
/// ```
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_small_amounts() {
        assert_eq!(format_usd(dec!(0)), "$0.00");
        assert_eq!(format_usd(dec!(7)), "$7.00");
        assert_eq!(format_usd(dec!(999.9)), "$999.90");
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(format_usd(dec!(1000)), "$1,000.00");
        assert_eq!(format_usd(dec!(10025)), "$10,025.00");
        assert_eq!(format_usd(dec!(14899.5)), "$14,899.50");
        assert_eq!(format_usd(dec!(1234567.891)), "$1,234,567.89");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(format_usd(dec!(0.005)), "$0.01");
        assert_eq!(format_usd(dec!(2.675)), "$2.68");
        assert_eq!(format_usd(dec!(-2.675)), "-$2.68");
    }

    #[test]
    fn test_negative_and_negative_zero() {
        assert_eq!(format_usd(dec!(-1500)), "-$1,500.00");
        assert_eq!(format_usd(dec!(-0.001)), "$0.00");
    }
}
