//! Permissive scalar parsing shared by settings and directive attributes.
//!
//! Directive attributes and stored options arrive as loosely typed text.
//! These helpers mirror the lenient numeric conversions content authors
//! expect: leading numbers are honored (`"6px"` reads as 6) and anything
//! unparseable reads as zero.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid leading-int pattern"));

static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid leading-float pattern")
});

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}){1,2}$").expect("valid hex color pattern"));

/// Reads the integer at the start of `s`, if there is one.
///
/// Values beyond the `i64` range saturate.
pub fn leading_int(s: &str) -> Option<i64> {
    let digits = LEADING_INT.captures(s)?.get(1)?.as_str();
    Some(digits.parse::<i64>().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

/// Integer value of `s`, zero when it does not start with a number.
pub fn int_value(s: &str) -> i64 {
    leading_int(s).unwrap_or(0)
}

/// Reads the decimal number at the start of `s`, if there is one.
pub fn leading_float(s: &str) -> Option<f64> {
    let number = LEADING_FLOAT.captures(s)?.get(1)?.as_str();
    number.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Decimal value of `s`, `0.0` when it does not start with a number.
pub fn float_value(s: &str) -> f64 {
    leading_float(s).unwrap_or(0.0)
}

/// Parses a boolean flag written as text.
///
/// Recognizes `true/false`, `1/0`, `yes/no` and `on/off` (case-insensitive,
/// surrounding whitespace ignored); the empty string reads as `false`.
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Returns `true` for `#rgb` and `#rrggbb` colors.
pub fn is_hex_color(s: &str) -> bool {
    HEX_COLOR.is_match(s)
}

/// Formats a float the way authors write it: no trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
