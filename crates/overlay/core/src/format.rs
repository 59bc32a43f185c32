//! Human-readable duration formatting.

/// Formats a duration in seconds as `HH:MM:SS`.
///
/// The value is rounded to whole seconds before it is split, so `59.6` becomes
/// `00:01:00` rather than `00:00:60`. Hours are not wrapped at 24 and grow past
/// two digits when needed. Negative durations keep their sign; non-finite
/// values render as `--:--:--`.
pub fn format_hms(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "--:--:--".to_owned();
    }

    let sign = if seconds < 0.0 { "-" } else { "" };
    let total = seconds.abs().round() as u64;
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let secs = total % 60;

    format!("{sign}{hours:02}:{minutes:02}:{secs:02}")
}
