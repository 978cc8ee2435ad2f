//! Timestamp column conversions

use chrono::{DateTime, Utc};

/// Convert a stored millisecond timestamp
///
/// Values outside chrono's range collapse to the Unix epoch.
#[inline]
pub fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

/// Convert a timestamp to its stored form
#[inline]
pub fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millisecond_precision_is_kept() {
        let now = Utc::now();
        let restored = from_millis(to_millis(now));
        assert_eq!(restored.timestamp_millis(), now.timestamp_millis());
        assert!(now - restored < chrono::Duration::milliseconds(1));
    }
}
