use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// On-disk date format for task groups.
pub const DATE_FORMAT: &str = "%d/%m/%Y";
/// On-disk time-of-day format for tasks.
pub const HOUR_FORMAT: &str = "%H:%M";

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_hour(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), HOUR_FORMAT).ok()
}

pub fn format_hour(time: NaiveTime) -> String {
    time.format(HOUR_FORMAT).to_string()
}

/// `h * 60 + m` for an `HH:MM` string.
pub fn minutes_since_midnight(hour: &str) -> Option<u32> {
    parse_hour(hour).map(|t| t.hour() * 60 + t.minute())
}

/// Combine a group date and a task hour into a concrete date-time.
pub fn scheduled_at(date: &str, hour: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_hour(hour)?))
}

pub fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}
