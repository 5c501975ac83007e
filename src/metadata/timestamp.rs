use crate::metadata::error::{MetadataError, MetadataResult};

pub const DEFAULT_SEPARATOR: char = ':';

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Parses `[[H:]M:]S[.fff]` into milliseconds; missing leading fields count as zero.
pub fn parse_timestamp(timestamp: &str) -> MetadataResult<u32> {
    parse_timestamp_with(timestamp, DEFAULT_SEPARATOR)
}

pub fn parse_timestamp_with(timestamp: &str, separator: char) -> MetadataResult<u32> {
    let invalid = || MetadataError::InvalidTimestamp(timestamp.to_string());

    let parts: Vec<&str> = timestamp.trim().split(separator).collect();
    if parts.len() > 3 {
        return Err(invalid());
    }

    let mut seconds = 0f64;
    for part in &parts {
        seconds = seconds * 60.0 + parse_field(part).ok_or_else(invalid)?;
    }

    let ms = (seconds * MS_PER_SECOND as f64).round();
    if ms > u32::MAX as f64 {
        return Err(invalid());
    }

    Ok(ms as u32)
}

fn parse_field(field: &str) -> Option<f64> {
    let (whole, fraction) = match field.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (field, None),
    };

    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !fraction.is_none_or(digits) {
        return None;
    }
    if whole.is_empty() && fraction.is_none_or(str::is_empty) {
        return None;
    }

    field.parse().ok()
}

/// Formats milliseconds as `HH:MM:SS`, adding `.mmm` only for a non-zero remainder.
pub fn format_timestamp(ms: u32) -> String {
    let ms = ms as u64;

    let hours = ms / MS_PER_HOUR;
    let minutes = ms % MS_PER_HOUR / MS_PER_MINUTE;
    let seconds = ms % MS_PER_MINUTE / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;

    let hhmmss = format!("{hours:02}:{minutes:02}:{seconds:02}");
    if millis == 0 {
        hhmmss
    } else {
        format!("{hhmmss}.{millis:03}")
    }
}
