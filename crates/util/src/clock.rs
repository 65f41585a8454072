/// Formats the current wall-clock time (UTC) the way log lines print it,
/// e.g. `2025-03-14 09:26:53`.
/// Returns `None` if the system clock cannot be read.
pub fn format_now() -> Option<String> {
    let ts = time_format::now().ok()?;
    format_timestamp(ts)
}

pub fn format_timestamp(ts: time_format::TimeStamp) -> Option<String> {
    time_format::strftime_utc("%Y-%m-%d %H:%M:%S", ts).ok()
}
