use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the UNIX epoch, 0 if the clock is before it
pub fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
