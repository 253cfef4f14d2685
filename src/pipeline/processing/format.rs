//! Number rounding and rendering shared by the enrichment and export steps.
//!
//! The published figures were produced with half-up rounding and en-US
//! grouping, so the helpers here reproduce exactly that.

use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Round half up (`2.5 -> 3`, `-2.5 -> -2`).
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Encode a number as JSON, using an integer when the value is integral.
pub fn json_number(x: f64) -> Value {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 9_007_199_254_740_992.0 {
        Value::from(x as i64)
    } else {
        Number::from_f64(x).map(Value::Number).unwrap_or(Value::Null)
    }
}

pub fn serialize_number<S: Serializer>(x: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    json_number(*x).serialize(serializer)
}

pub fn serialize_opt_number<S: Serializer>(
    x: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match x {
        Some(x) => json_number(*x).serialize(serializer),
        None => serializer.serialize_none(),
    }
}

/// Shortest plain rendering: `5`, `5.5`, `-0.3`.
pub fn format_number(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    format!("{}", x)
}

/// A CSV cell for an optional metric; missing values are empty.
pub fn number_cell(x: Option<f64>) -> String {
    x.map(format_number).unwrap_or_default()
}

/// en-US grouping with at most three fraction digits: `1234567.5 -> 1,234,567.5`.
pub fn format_grouped(x: f64) -> String {
    let fixed = format!("{:.3}", x.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let negative = x < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// One-decimal percentage, as published in the CSV exports. Ties round
/// up: `6.25 -> "6.3"`.
pub fn format_percent(x: f64) -> String {
    format!("{:.1}", round_half_up(x * 10.0) / 10.0)
}
