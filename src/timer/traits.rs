use embassy_time::{Duration, Instant};

/// 时间提供者抽象接口
/// 用于抽象单调时钟，支持在测试中模拟时间流逝
pub trait TimeProvider {
    /// 获取当前时间
    fn now(&self) -> Instant;
}

impl<T: TimeProvider + ?Sized> TimeProvider for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// 经过时间计时器接口
///
/// - `start`: 开始/继续累计（已在运行时不重置）
/// - `stop`: 停止并清零
/// - `elapsed`: 自上次 `start` 以来累计的时长，停止状态下为零
pub trait ElapsedTimer {
    fn start(&mut self);

    fn stop(&mut self);

    fn elapsed(&self) -> Duration;

    fn is_running(&self) -> bool;

    /// 是否已经累计了至少 `duration`
    fn has_elapsed(&self, duration: Duration) -> bool {
        self.elapsed() >= duration
    }

    /// 停止后立即重新开始，从当前时刻重新计时
    fn restart(&mut self) {
        self.stop();
        self.start();
    }
}
