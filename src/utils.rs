//! Common formatting helpers.

/// Format a count with K/M suffix for compact log output.
///
/// # Examples
/// ```
/// use phalanx::utils::format_count;
/// assert_eq!(format_count(500), "500");
/// assert_eq!(format_count(1500), "1.5K");
/// assert_eq!(format_count(1_500_000), "1.5M");
/// ```
pub fn format_count(count: usize) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}
