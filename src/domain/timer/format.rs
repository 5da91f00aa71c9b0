//! Elapsed-time text formatting

/// Text shown by a timer display that has nothing to report yet
pub const PLACEHOLDER: &str = "-:-";

/// Text for a zero (or unusable) elapsed time
pub const ZERO: &str = "00:00";

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * 60;

/// Format elapsed seconds for the record and play timer displays.
///
/// - under a minute: `00:SS`
/// - under an hour: `MM:SS`
/// - otherwise: `HH:MM:SS`
///
/// Fractional seconds are floored. Zero, negative and non-finite
/// input (NaN, infinity) all render as `00:00`.
pub fn format_timer(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 1.0 {
        return ZERO.to_string();
    }

    let total = seconds.floor() as u64;

    if total < SECS_PER_MINUTE {
        return format!("00:{:02}", total);
    }

    if total < SECS_PER_HOUR {
        return format!("{:02}:{:02}", total / SECS_PER_MINUTE, total % SECS_PER_MINUTE);
    }

    let hours = total / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let secs = total % SECS_PER_MINUTE;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
