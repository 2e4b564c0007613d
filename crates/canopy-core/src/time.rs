//! Millisecond epoch timestamps.

/// Current UTC time as milliseconds since the Unix epoch.
///
/// This is the timestamp format every wire envelope carries.
#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_ms_is_recent() {
        // 2024-01-01T00:00:00Z in ms — anything earlier means a broken clock
        // source, not a broken helper.
        assert!(now_ms() > 1_704_067_200_000);
    }

    #[test]
    fn now_ms_is_monotonic_enough() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
