use chrono::prelude::*;
use chrono_tz::Tz;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// The wall-clock reading the reminder job works with during one tick.
///
/// `current_time` and `current_date` are the exact strings stored
/// `Reminder`s are matched against.
#[derive(Debug, Clone)]
pub struct ClockReading {
    pub now: DateTime<Tz>,
    pub current_time: String,
    pub current_date: String,
}

impl ClockReading {
    pub fn at(timestamp_millis: i64, tz: &Tz) -> Self {
        let now = DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
            .unwrap_or_default()
            .with_timezone(tz);
        Self {
            current_time: format_time(&now),
            current_date: format_date(&now),
            now,
        }
    }
}

/// Zero padded 24 hour `HH:MM`
pub fn format_time<T: TimeZone>(date: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    date.format(TIME_FORMAT).to_string()
}

/// ISO calendar date `YYYY-MM-DD`
pub fn format_date<T: TimeZone>(date: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(datestr: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(datestr, DATE_FORMAT).ok()
}

pub fn is_valid_date(datestr: &str) -> bool {
    // chrono accepts unpadded fields, stored dates must compare as strings
    datestr.len() == 10 && parse_date(datestr).is_some()
}

pub fn is_valid_time(timestr: &str) -> bool {
    timestr.len() == 5 && NaiveTime::parse_from_str(timestr, TIME_FORMAT).is_ok()
}
