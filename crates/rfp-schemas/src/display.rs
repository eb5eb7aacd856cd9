//! Human-readable formatting of durations.
//!
//! Matches the portal's established display convention: `2h 5m 3s`,
//! `5m 3s`, or `3s`, with `--` standing in for "no value".

/// Humanize a duration in seconds.
///
/// Sub-second fractions are truncated, not rounded.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Humanize an optional duration; absent or zero renders as `--`.
///
/// Zero maps to the placeholder deliberately: the portal treats a zero
/// duration as "not measured", matching the upstream display rule.
pub fn format_duration_opt(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s > 0.0 => format_duration(s),
        _ => "--".to_string(),
    }
}
