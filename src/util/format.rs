//! Small text helpers used by page markup.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable byte count in base-1024 units with at most two decimals,
/// e.g. `1536` -> `"1.5 KB"`. Sizes past GB stay in GB.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", SIZE_UNITS[unit])
}

/// Byte count from a page-supplied number. Negative, fractional, or
/// non-numeric input is floored into range.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn byte_count(raw: Option<f64>) -> u64 {
    match raw {
        Some(bytes) if bytes.is_finite() && bytes > 0.0 => bytes.floor() as u64,
        _ => 0,
    }
}
