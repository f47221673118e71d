use anyhow::{Context, Result};
use jiff::Timestamp;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Render a `<time>` annotation: the creation timestamp kept verbatim in the
/// `datetime` attribute, a human-readable phrase as the text.
pub fn time_tag(created_at: &str, now: Timestamp) -> Result<String> {
    let created: Timestamp = created_at
        .parse()
        .with_context(|| format!("Invalid timestamp: {}", created_at))?;

    Ok(format!(
        "<time datetime=\"{}\">{}</time>",
        created_at,
        relative_phrase(created, now)
    ))
}

/// Human-readable "N units ago" phrase for a creation instant.
pub fn relative_phrase(created: Timestamp, now: Timestamp) -> String {
    let secs = now.as_second() - created.as_second();

    if secs < 1 {
        return "just now".to_string();
    }

    let (count, unit) = if secs < MINUTE {
        (secs, "second")
    } else if secs < HOUR {
        (secs / MINUTE, "minute")
    } else if secs < DAY {
        (secs / HOUR, "hour")
    } else if secs < MONTH {
        (secs / DAY, "day")
    } else if secs < YEAR {
        (secs / MONTH, "month")
    } else {
        (secs / YEAR, "year")
    };

    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
