use chrono::{DateTime, NaiveDate, NaiveDateTime};
use flexi_logger::{FlexiLoggerError, Logger};

pub fn init_log() -> Result<(), FlexiLoggerError> {
    let _lg = Logger::try_with_env_or_str("info")?
        .log_to_stdout()
        .start()?;
    Ok(())
}

// pubDate values seen in the wild that are not strict RFC 2822,
// tried after any leading weekday is stripped
const DATETIME_FORMATS: [&str; 2] = ["%d %b %Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%d %b %Y", "%Y-%m-%d"];

/// Parse a feed publish date into unix seconds.
pub fn to_timestamp(date: &str) -> Option<i64> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(date) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.timestamp());
    }
    // feeds often carry a weekday that does not match the date, which chrono
    // rejects, so retry everything without the leading "Ddd, "
    if let Some((_, rest)) = date.split_once(", ") {
        if let Some(ts) = parse_loose(rest) {
            return Some(ts);
        }
    }
    parse_loose(date)
}

fn parse_loose(date: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_str(date, "%d %b %Y %H:%M:%S %z") {
        return Some(dt.timestamp());
    }
    // drop a trailing zone name like "GMT" or "EST" that chrono won't take
    let bare = match date.rsplit_once(' ') {
        Some((head, zone)) if zone.chars().all(|c| c.is_ascii_alphabetic()) => head,
        _ => date,
    };
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(bare, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|dt| dt.and_utc().timestamp())
}
