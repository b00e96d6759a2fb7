use chrono::{DateTime, Duration, NaiveDateTime, Utc};

pub const NANOS_IN_1_MS: i64 = 1_000_000;
pub const NANOS_IN_1_SEC: i64 = 1_000_000_000;

// doesnt panic, every i64 nanosecond timestamp fits chrono's range
pub fn time_from_nanos(nanos: i64) -> NaiveDateTime {
    let secs = nanos.div_euclid(NANOS_IN_1_SEC);
    let subsec_nanos = u32::try_from(nanos.rem_euclid(NANOS_IN_1_SEC)).unwrap_or_default();
    DateTime::from_timestamp(secs, subsec_nanos)
        .unwrap_or_default()
        .naive_utc()
}

// doesn't panic before the year 2262
pub fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

/// `offset_minutes` follows the browser convention of `Date.getTimezoneOffset()`:
/// minutes to add to local time to get UTC (positive west of Greenwich).
pub fn utc_to_local_date(utc: NaiveDateTime, offset_minutes: i64) -> NaiveDateTime {
    utc - Duration::minutes(offset_minutes)
}

pub fn local_date_to_utc(local: NaiveDateTime, offset_minutes: i64) -> NaiveDateTime {
    local + Duration::minutes(offset_minutes)
}

fn local_from_nanos(nanos: i64, offset_minutes: i64) -> NaiveDateTime {
    utc_to_local_date(time_from_nanos(nanos), offset_minutes)
}

/// `HH:MM:SS.mmm`
pub fn format_timestamp(nanos: i64, offset_minutes: i64) -> String {
    local_from_nanos(nanos, offset_minutes)
        .format("%H:%M:%S%.3f")
        .to_string()
}

/// `YYYY-MM-DD`
pub fn format_date(nanos: i64, offset_minutes: i64) -> String {
    local_from_nanos(nanos, offset_minutes)
        .format("%Y-%m-%d")
        .to_string()
}

pub fn format_date_time(nanos: i64, offset_minutes: i64) -> String {
    format!(
        "{} {}",
        format_date(nanos, offset_minutes),
        format_timestamp(nanos, offset_minutes)
    )
}

pub fn format_relative_time(nanos: i64, now_nanos: i64) -> String {
    let diff_ms = now_nanos.saturating_sub(nanos) / NANOS_IN_1_MS;
    let seconds = diff_ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("{days}d ago")
    } else if hours > 0 {
        format!("{hours}h ago")
    } else if minutes > 0 {
        format!("{minutes}m ago")
    } else if seconds > 0 {
        format!("{seconds}s ago")
    } else {
        "just now".to_string()
    }
}

pub fn nanos_to_millis(nanos: i64) -> f64 {
    nanos as f64 / NANOS_IN_1_MS as f64
}

pub fn millis_to_nanos(millis: f64) -> i64 {
    (millis * NANOS_IN_1_MS as f64) as i64
}
