use crate::time_conversion::NANOS_IN_1_MS;

pub fn format_duration(ms: f64) -> String {
    if ms < 1. {
        return format!("{:.0}µs", ms * 1000.);
    }
    if ms < 1000. {
        return format!("{ms:.1}ms");
    }
    let seconds = ms / 1000.;
    if seconds < 60. {
        return format!("{seconds:.2}s");
    }
    let minutes = (seconds / 60.).floor();
    let remaining_seconds = seconds % 60.;
    format!("{minutes:.0}m {remaining_seconds:.0}s")
}

/// Shorter variant for waterfall rows and table cells.
pub fn format_duration_compact(ms: f64) -> String {
    if ms < 1. {
        return format!("{:.0}µs", ms * 1000.);
    }
    if ms < 1000. {
        return format!("{ms:.0}ms");
    }
    let seconds = ms / 1000.;
    if seconds < 60. {
        return format!("{seconds:.1}s");
    }
    format!("{:.1}m", seconds / 60.)
}

pub fn format_nano_duration(start_unix_nano: i64, end_unix_nano: i64) -> String {
    let ms = end_unix_nano.saturating_sub(start_unix_nano) as f64 / NANOS_IN_1_MS as f64;
    format_duration(ms)
}

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// First `len` chars of an id, for table cells.
pub fn short_id(id: &str, len: usize) -> &str {
    match id.char_indices().nth(len) {
        Some((byte_idx, _)) => &id[..byte_idx],
        None => id,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(0.25), "250µs");
        assert_eq!(format_duration(12.345), "12.3ms");
        assert_eq!(format_duration(1500.), "1.50s");
        assert_eq!(format_duration(125_000.), "2m 5s");
    }

    #[test]
    fn compact_durations() {
        assert_eq!(format_duration_compact(0.004), "4µs");
        assert_eq!(format_duration_compact(99.6), "100ms");
        assert_eq!(format_duration_compact(2_340.), "2.3s");
        assert_eq!(format_duration_compact(90_000.), "1.5m");
    }

    #[test]
    fn nano_durations() {
        assert_eq!(format_nano_duration(1_000_000, 3_500_000), "2.5ms");
        assert_eq!(format_nano_duration(0, 0), "0µs");
    }

    #[test]
    fn helpers() {
        assert_eq!(pluralize(1, "span", "spans"), "1 span");
        assert_eq!(pluralize(3, "span", "spans"), "3 spans");
        assert_eq!(short_id("4bf92f3577b34da6", 8), "4bf92f35");
        assert_eq!(short_id("abc", 8), "abc");
    }
}
