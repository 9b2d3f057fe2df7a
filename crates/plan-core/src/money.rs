//! Currency formatting for user-facing messages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount with two decimals and thousands separators, sign first.
///
/// Example:
/// assert_eq!(format_currency(Decimal::new(-123450, 2), "$"), "-$1,234.50");
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{frac_part}")
}
