use chrono::Utc;
use std::sync::Mutex;

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Controllable clock for tests that need to move time forward, e.g.
/// to make a retried job due again.
pub struct FakeSys {
    now: Mutex<i64>,
}

impl FakeSys {
    pub fn new(now: i64) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set_timestamp_millis(&self, now: i64) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance_millis(&self, millis: i64) {
        *self.now.lock().unwrap() += millis;
    }
}

impl ISys for FakeSys {
    fn get_timestamp_millis(&self) -> i64 {
        *self.now.lock().unwrap()
    }
}
