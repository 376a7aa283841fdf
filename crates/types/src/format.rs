//! Human-readable rendering of byte counts and durations

use std::time::Duration;

/// Format an integer with `,` thousands separators (`1234567` -> `1,234,567`)
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a duration as `hh:mm:ss.fffffff`
///
/// The fraction has 100ns resolution and is omitted when zero. Durations of
/// a day or more get a `d.` prefix.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let days = total_secs / 86_400;
    let hours = (total_secs / 3_600) % 24;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    let ticks = elapsed.subsec_nanos() / 100;

    let day_prefix = if days > 0 {
        format!("{days}.")
    } else {
        String::new()
    };
    let fraction = if ticks > 0 {
        format!(".{ticks:07}")
    } else {
        String::new()
    };
    format!("{day_prefix}{hours:02}:{minutes:02}:{seconds:02}{fraction}")
}
