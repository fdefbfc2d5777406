//! Brazilian-locale number formatting

/// Round to cents, the precision every monetary value is kept at
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a value as Brazilian reais: `1234.5` -> `R$ 1.234,50`
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    let whole = group_thousands(&(cents / 100).to_string());
    format!("R$ {}{},{:02}", sign, whole, cents % 100)
}

/// Insert `.` between groups of three digits
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
