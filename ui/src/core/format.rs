//! Formatting helpers for presenting life statistics.

/// Group an integer with comma thousands separators (`1565` → `"1,565"`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a year count the way a person would write it: no trailing `.0`.
pub fn format_years(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Two-digit zero padded clock component.
pub fn pad2(value: u32) -> String {
    format!("{value:02}")
}
