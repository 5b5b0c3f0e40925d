//! Clock-style display of media durations.

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up.
///
/// Fractions are truncated. Returns `None` for durations that are not
/// finite and positive, which the embed reports for live or unloaded media.
pub fn format_duration(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }

    let total = seconds as u64;
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    Some(if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    })
}
