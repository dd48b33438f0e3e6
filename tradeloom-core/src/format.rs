//! Display formatting for card values and percentages.

/// Placeholder for values that are missing or not finite.
pub const MISSING: &str = "n/a";

/// Round to a whole number and group thousands with commas: `12000.4` →
/// `12,000`, `-2500` → `-2,500`.
pub fn thousands(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }

    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0.0 && digits != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Shortest decimal form of a percentage, always with at least one
/// fractional digit: `3.2` → `3.2`, `7.0` → `7.0`.
pub fn percent(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Card value with the million-dollar unit suffix.
pub fn million_usd(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{} M$", thousands(v)),
        _ => MISSING.to_string(),
    }
}

/// Raw table cell: the stored value as written, blank when missing.
pub fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => String::new(),
    }
}
