use chrono::{DateTime, Local};

/// Layout accepted for `begin_time` / `end_time`, e.g. `2006-01-02T15:04:05-07:00`.
///
/// Fractional seconds are optional; the offset must be written `±hh:mm`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// How raw time bounds are read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// A chrono layout carrying a numeric UTC offset
    Layout(&'static str),
    /// Integer seconds since the unix epoch
    EpochSeconds,
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self::Layout(DATE_TIME_FORMAT)
    }
}

/// Parse `raw` with `format` and convert it to the local timezone.
///
/// Anything that does not match yields `None`, never an error.
#[must_use]
pub fn parse_local(raw: &str, format: TimeFormat) -> Option<DateTime<Local>> {
    match format {
        TimeFormat::Layout(layout) => {
            // chrono's `%:z` also takes `-0700`
            if layout.ends_with("%:z") && !has_colon_offset(raw) {
                return None;
            }
            DateTime::parse_from_str(raw, layout).ok().map(|t| t.with_timezone(&Local))
        }
        TimeFormat::EpochSeconds => raw
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|t| t.with_timezone(&Local)),
    }
}

/// `raw` ends with an offset such as `+08:00`
fn has_colon_offset(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let Some(start) = bytes.len().checked_sub(6) else {
        return false;
    };
    matches!(bytes[start], b'+' | b'-') && bytes[start + 3] == b':'
}
