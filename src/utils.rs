use time::OffsetDateTime;

// Returns the current time in milliseconds
pub fn timestamp() -> f64 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() as f64 * 1e-6
}
