//! Turkish-locale number formatting for the screen panels.

/// Format a money amount the way tr-TR does: `.` groups thousands, `,`
/// separates two decimals. `1234.5` becomes `1.234,50`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{},{:02}", group_thousands(cents / 100), cents % 100)
}

/// Split a total into its grouped whole part and two-digit cents, for the
/// large headline figure: `12345.678` gives `("12.345", "68")`.
pub fn split_whole_fraction(value: f64) -> (String, String) {
    if !value.is_finite() {
        return ("N/A".to_string(), "00".to_string());
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    (
        format!("{sign}{}", group_thousands(cents / 100)),
        format!("{:02}", cents % 100),
    )
}

/// `+1.23%` for gains (and zero), `-1.23%` for losses.
pub fn format_signed_percent(percent: f64) -> String {
    if !percent.is_finite() {
        return "N/A".to_string();
    }
    if percent >= 0.0 {
        format!("+{percent:.2}%")
    } else {
        format!("{percent:.2}%")
    }
}

/// Ounces with four decimals.
pub fn format_asset_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "N/A".to_string();
    }
    format!("{amount:.4} oz")
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
