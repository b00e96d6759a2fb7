use api_structs::time_conversion::{self, NANOS_IN_1_MS};

fn browser_offset_minutes() -> i64 {
    js_sys::Date::new_0().get_timezone_offset() as i64
}

pub fn now_nanos() -> i64 {
    js_sys::Date::now() as i64 * NANOS_IN_1_MS
}

pub fn printable_local_timestamp(nanos: i64) -> String {
    time_conversion::format_timestamp(nanos, browser_offset_minutes())
}

pub fn printable_local_date_time(nanos: i64) -> String {
    time_conversion::format_date_time(nanos, browser_offset_minutes())
}

pub fn printable_time_ago(nanos: i64) -> String {
    time_conversion::format_relative_time(nanos, now_nanos())
}
