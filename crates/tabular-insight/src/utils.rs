//! Shared coercion helpers.
//!
//! Every component reads strings through these functions, so the policy for
//! "what counts as a number / date / boolean" is defined exactly once.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

// =============================================================================
// Numeric Parsing
// =============================================================================

/// Try to parse a string as a finite floating-point literal.
///
/// Surrounding whitespace is ignored. The whole remaining string must be a
/// decimal literal (optional sign, fraction and exponent); `NaN`, infinities
/// and trailing garbage such as `"12px"` are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use tabular_insight::utils::parse_number;
///
/// assert_eq!(parse_number(" 3.5 "), Some(3.5));
/// assert_eq!(parse_number("1e3"), Some(1000.0));
/// assert_eq!(parse_number("12px"), None);
/// ```
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Check if a string can be parsed as a number.
pub fn is_numeric_string(s: &str) -> bool {
    parse_number(s).is_some()
}

/// Round half away from zero to a fixed number of decimals.
///
/// Values too large to scale are returned unchanged; they have no
/// fractional digits left to round.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

// =============================================================================
// Date Parsing
// =============================================================================

/// Date-time layouts accepted without a timezone.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Calendar date layouts.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Try to parse a string as a calendar date or date-time.
///
/// Offsets in RFC 3339 / RFC 2822 input are normalized to UTC.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    // Year-month only ("2024-03")
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Check if a string looks like a date.
pub fn is_date_string(s: &str) -> bool {
    parse_date(s).is_some()
}

// =============================================================================
// Boolean Detection
// =============================================================================

/// Literals a boolean column may contain (compared lowercase, trimmed).
pub const BOOLEAN_LITERALS: [&str; 6] = ["true", "false", "0", "1", "yes", "no"];

/// Check if a string is one of the accepted boolean literals.
pub fn is_boolean_literal(s: &str) -> bool {
    let lower = s.trim().to_lowercase();
    BOOLEAN_LITERALS.contains(&lower.as_str())
}

// =============================================================================
// Tests
// =============================================================================
