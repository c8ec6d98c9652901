//! A stand-in for `chrono::Utc` whose notion of now is set by the test.

use chrono::DateTime;
use std::cell::Cell;

pub const DEFAULT_TIMESTAMP: i64 = 1234567890;

thread_local! {
    static TIMESTAMP: Cell<i64> = const { Cell::new(DEFAULT_TIMESTAMP) };
}

pub fn set_timestamp(timestamp: i64) {
    TIMESTAMP.with(|ts| ts.set(timestamp));
}

pub struct Utc;

impl Utc {
    pub fn now() -> DateTime<chrono::Utc> {
        let timestamp = TIMESTAMP.with(|ts| ts.get());
        DateTime::from_timestamp(timestamp, 0)
            .expect("test timestamp must be within range")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        assert_eq!(Utc::now().timestamp(), DEFAULT_TIMESTAMP);
        set_timestamp(42);
        assert_eq!(Utc::now().timestamp(), 42);
    }
}
