/// Date formatting for cards and the detail view
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

/// Long US date, e.g. "Monday, November 11, 2019"
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%A, %B %-d, %Y").to_string()
}

/// Long date of a UTC instant as seen in the user's time zone
pub fn format_local_date(at: DateTime<Utc>) -> String {
    format_date(&at.with_timezone(&Local))
}

/// Date and wall-clock time with offset, e.g. "November 11, 2019, 2:56:00 PM +00:00"
pub fn format_date_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%B %-d, %Y, %-I:%M:%S %p %:z").to_string()
}

/// Seconds per minute, minutes per hour, hours per day, days per week,
/// weeks per month, months per year
const STEPS: [f64; 6] = [60.0, 60.0, 24.0, 7.0, 365.0 / 7.0 / 12.0, 12.0];
const UNITS: [&str; 7] = ["second", "minute", "hour", "day", "week", "month", "year"];

/// Human relative time between `then` and `now`: "just now", "3 days ago",
/// "in 2 hours". Anything under ten seconds is "just now" / "right now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let future = seconds < 0;
    let mut diff = seconds.unsigned_abs() as f64;

    let mut unit = 0;
    while unit < STEPS.len() && diff >= STEPS[unit] {
        diff /= STEPS[unit];
        unit += 1;
    }
    let count = diff.floor() as u64;

    if unit == 0 && count <= 9 {
        return if future { "right now" } else { "just now" }.to_string();
    }

    let amount = if unit > 0 && count <= 1 {
        format!("1 {}", UNITS[unit])
    } else {
        format!("{} {}s", count, UNITS[unit])
    };

    if future {
        format!("in {amount}")
    } else {
        format!("{amount} ago")
    }
}
