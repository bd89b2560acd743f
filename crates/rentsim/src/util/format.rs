//! French-locale number formatting for the terminal and the report
//!
//! Thousands are grouped with a space and the decimal separator is a comma:
//! `122 000 €`, `5,90 %`.

/// Group the digits of `value` by thousands.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(' ');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format `value` with `decimals` fraction digits.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let factor = 10f64.powi(decimals as i32);
    let scaled = (value.abs() * factor).round();
    let whole = (scaled / factor).trunc();
    let fraction = scaled - whole * factor;

    let mut out = String::new();
    if value < 0.0 && scaled > 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(whole as u64));
    if decimals > 0 {
        out.push(',');
        out.push_str(&format!("{:0width$}", fraction as u64, width = decimals));
    }
    out
}

/// Whole euros, e.g. `122 000 €`
pub fn format_euros(value: f64) -> String {
    format!("{} €", format_number(value, 0))
}

/// Euros with cents, e.g. `1 751,40 €`
pub fn format_euros_cents(value: f64) -> String {
    format!("{} €", format_number(value, 2))
}

/// Rent per square metre, e.g. `35,03 €/m²`
pub fn format_per_sqm(value: f64) -> String {
    format!("{} €/m²", format_number(value, 2))
}

/// A value already expressed in percent, e.g. `5,90 %`
pub fn format_percent(percent: f64) -> String {
    format!("{} %", format_number(percent, 2))
}

/// Surface in square metres; decimals only when needed.
pub fn format_surface(surface: f64) -> String {
    if surface.fract() == 0.0 {
        format!("{} m²", format_number(surface, 0))
    } else {
        format!("{} m²", format_number(surface, 1))
    }
}
