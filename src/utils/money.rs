use rust_decimal::Decimal;

/// `$1234.50` style, two decimals, sign in front of the symbol
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

/// Parse a user-typed amount; must be a positive number
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    cleaned
        .parse::<Decimal>()
        .ok()
        .filter(|amount| amount.is_sign_positive() && !amount.is_zero())
}
