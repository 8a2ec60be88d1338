//! Conversions between the 12-hour display times stored on herds
//! (`"2:00 PM"`) and hours/`NaiveTime`.

use chrono::{NaiveTime, Timelike};

/// Hour used when a stored time cannot be parsed.
pub const FALLBACK_HOUR: u32 = 12;

/// Parses `H:MM AM` / `HH:MM PM` (case-insensitive, optional whitespace
/// before the meridiem) into a 24h hour and minute. The hour is not range
/// checked beyond being one or two digits.
fn parse_meridiem_clock(s: &str) -> Option<(u32, u32)> {
    let (hour, rest) = s.split_once(':')?;
    if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let minute = rest.get(..2)?;
    if !minute.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let meridiem = rest.get(2..)?.trim_start();

    let mut hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if meridiem.eq_ignore_ascii_case("PM") {
        if hour != 12 {
            hour += 12;
        }
    } else if meridiem.eq_ignore_ascii_case("AM") {
        if hour == 12 {
            hour = 0;
        }
    } else {
        return None;
    }
    Some((hour, minute))
}

/// 24h hour of a display time, ignoring minutes. `None` if malformed.
pub fn parse_hour(s: &str) -> Option<u32> {
    parse_meridiem_clock(s).map(|(hour, _)| hour)
}

/// 24h hour of a display time, or [`FALLBACK_HOUR`] if malformed.
pub fn hour_or_fallback(s: &str) -> u32 {
    parse_hour(s).unwrap_or(FALLBACK_HOUR)
}

/// Parses a display time into a `NaiveTime`.
pub fn parse_display_time(s: &str) -> Option<NaiveTime> {
    let (hour, minute) = parse_meridiem_clock(s)?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Formats a time for display: 14:05 → `"2:05 PM"`, 00:30 → `"12:30 AM"`.
pub fn format_display_time(time: NaiveTime) -> String {
    let hour = time.hour();
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, time.minute(), meridiem)
}

/// Accepts either 24h input (`"14:00"`) or a display time (`"2:00 PM"`).
pub fn parse_time_input(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .ok()
        .or_else(|| parse_display_time(s))
}
