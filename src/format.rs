//! Time label formatting shared by the progress labels and track durations.

/// Format `seconds` as `M:SS`.
///
/// Minutes are not padded, seconds always are. Unknown durations (NaN,
/// infinities, negative values) render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let minutes = (seconds / 60.0).floor() as u64;
    let remaining = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, remaining)
}
