use rust_decimal::Decimal;

/// Currency display precision (two decimal places)
pub const DISPLAY_SCALE: u32 = 2;

/// Round an amount to display precision.
///
/// Intermediate totals accumulate at full precision; this is applied only at
/// the final display step so per-line rounding never drifts the grand total.
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp(DISPLAY_SCALE)
}

/// Format an amount with exactly two decimal places, e.g. `270.00`.
pub fn format_display(amount: Decimal) -> String {
    format!("{:.2}", round_display(amount))
}

/// Format an amount as a dollar string for report rows, e.g. `$48,662.00`.
pub fn format_currency(amount: Decimal) -> String {
    let plain = format_display(amount);
    let (int_part, dec_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", sign, grouped, dec_part)
}

/// Convert a percentage (0-100) to a multiplier rate.
pub fn percent_to_rate(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}
