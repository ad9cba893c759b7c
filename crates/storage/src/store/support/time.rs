#![forbid(unsafe_code)]

pub(crate) fn now_ts() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration,
        Err(_) => return 0,
    };

    i64::try_from(now.as_secs()).unwrap_or(i64::MAX)
}
