// src/utils/duration.rs

//! Conversion between the site's duration notation and seconds.
//!
//! The site reports durations as free-form strings like `12½ Hours` or
//! `45 Mins`, with the half glyph sometimes left as its character
//! reference `&#189;`.

use crate::error::Result;

const HALF_REFERENCE: &str = "&#189;";
const HALF_GLYPH: &str = "½";

/// Convert a duration label to whole seconds.
///
/// A string containing `Hours` is read as hours, one containing `Mins`
/// as minutes ("Hours" wins when both appear). A string with neither
/// unit means the site reported no figure and yields `Ok(0)`. A numeral
/// that fails to parse after stripping is an error; callers decide
/// whether that drops the field or the record.
pub fn parse_duration(text: &str) -> Result<u64> {
    if text.contains("Hours") {
        return parse_value(&text.replace("Hours", ""), 3600.0);
    }
    if text.contains("Mins") {
        return parse_value(&text.replace("Mins", ""), 60.0);
    }
    Ok(0)
}

fn parse_value(raw: &str, unit_seconds: f64) -> Result<u64> {
    let normalized = raw.replace(HALF_REFERENCE, ".5").replace(HALF_GLYPH, ".5");
    // f64's FromStr only accepts "." as the decimal separator, which is
    // exactly the site's notation regardless of the process locale.
    let value: f64 = normalized.trim().parse()?;
    Ok((value * unit_seconds) as u64)
}

/// Format a second count for display, e.g. `45000` -> `12h 30m`.
///
/// Zero means the site reported nothing and renders as `--`.
pub fn format_seconds(seconds: u64) -> String {
    if seconds == 0 {
        return "--".to_string();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}
