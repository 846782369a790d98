use std::time::{SystemTime, UNIX_EPOCH};

pub trait SystemTimeExt {
    /// Whole seconds since the unix epoch, negative before it.
    fn to_unix_secs(&self) -> i64;
}

impl SystemTimeExt for SystemTime {
    fn to_unix_secs(&self) -> i64 {
        match self.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs().min(i64::MAX as u64) as i64,
            Err(e) => -(e.duration().as_secs().min(i64::MAX as u64) as i64),
        }
    }
}
