use std::sync::{Arc, Mutex};

use embassy_time::{Duration, Instant};

use super::traits::TimeProvider;

/// Mock时间提供者，用于测试中精确控制时间流逝
/// 克隆出的实例共享同一个时钟
#[derive(Clone, Debug)]
pub struct MockTimeProvider {
    current_time: Arc<Mutex<Instant>>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self {
            current_time: Arc::new(Mutex::new(Instant::from_millis(0))),
        }
    }

    /// 推进时间（用于测试）
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().unwrap();
        *time = *time + duration;
    }

    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// 设置绝对时间（用于测试）
    pub fn set(&self, time: Instant) {
        *self.current_time.lock().unwrap() = time;
    }
}

impl TimeProvider for MockTimeProvider {
    fn now(&self) -> Instant {
        *self.current_time.lock().unwrap()
    }
}
