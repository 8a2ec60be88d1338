use chrono::NaiveTime;

use crate::classes;
use crate::clock;
use crate::error::{HerdError, HerdResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> HerdResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(HerdError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates that a set/vec is non-empty.
pub fn non_empty_set<T>(value: &[T], field: &str) -> HerdResult<()> {
    if value.is_empty() {
        Err(HerdError::EmptySet {
            field: field.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Checks every code against the catalog and drops repeats, keeping the
/// first occurrence.
pub fn known_classes(codes: &[String]) -> HerdResult<Vec<String>> {
    let mut result: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.trim().to_uppercase();
        if !classes::is_known(&code) {
            return Err(HerdError::UnknownClass { code });
        }
        if !result.contains(&code) {
            result.push(code);
        }
    }
    Ok(result)
}

/// Parses a time typed by the user (`"14:00"` or `"2:00 PM"`).
pub fn time_input(value: &str) -> HerdResult<NaiveTime> {
    clock::parse_time_input(value).ok_or_else(|| HerdError::InvalidTime {
        value: value.to_string(),
    })
}

/// Parses optional start and end times; when both are present the end must
/// come after the start.
pub fn time_range(
    start: Option<&str>,
    end: Option<&str>,
) -> HerdResult<(Option<NaiveTime>, Option<NaiveTime>)> {
    let start = trim_optional(start).map(|s| time_input(&s)).transpose()?;
    let end = trim_optional(end).map(|s| time_input(&s)).transpose()?;
    if let (Some(s), Some(e)) = (start, end) {
        if e <= s {
            return Err(HerdError::EndBeforeStart);
        }
    }
    Ok((start, end))
}
