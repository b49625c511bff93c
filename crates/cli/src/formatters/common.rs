//! Common utilities for formatters.

/// Representation of an unknown value in human-facing output.
pub const UNKNOWN_VALUE: &str = "n/a";

pub fn format_optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| UNKNOWN_VALUE.to_string(), |v| v.to_string())
}

/// Decimal gigabytes with two places, e.g. `48.00 GB`.
pub fn format_memory(bytes: Option<u64>) -> String {
    bytes.map_or_else(
        || UNKNOWN_VALUE.to_string(),
        |b| format!("{:.2} GB", b as f64 / 1_000_000_000.0),
    )
}

/// A scaling value, where negative means the node pool does not report it.
pub fn format_scaling_value(value: i64) -> String {
    if value < 0 {
        UNKNOWN_VALUE.to_string()
    } else {
        value.to_string()
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
