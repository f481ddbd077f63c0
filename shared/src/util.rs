/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Whole minutes elapsed between two millisecond timestamps.
///
/// Returns 0 when `later` is not actually later (clock skew between roles).
pub fn minutes_between(earlier: i64, later: i64) -> i64 {
    ((later - earlier) / 60_000).max(0)
}
