//! Remaining-time display formatting

/// Format a number of seconds as zero-padded `HH:MM:SS`.
///
/// Hours are not clamped; a duration past 99 hours simply widens the hour
/// field.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
