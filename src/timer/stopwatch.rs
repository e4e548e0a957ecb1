use embassy_time::{Duration, Instant};

use super::traits::{ElapsedTimer, TimeProvider};

/// 基于 [`TimeProvider`] 的秒表
///
/// 只记录开始时刻，经过时间在查询时按当前时钟计算，因此不需要周期性更新。
#[derive(Clone, Debug)]
pub struct Stopwatch<T: TimeProvider> {
    time_provider: T,
    started_at: Option<Instant>,
}

impl<T: TimeProvider> Stopwatch<T> {
    /// 创建处于停止状态的秒表
    pub fn new(time_provider: T) -> Self {
        Self {
            time_provider,
            started_at: None,
        }
    }

    /// 创建并立即开始计时
    pub fn started(time_provider: T) -> Self {
        let mut stopwatch = Self::new(time_provider);
        stopwatch.start();
        stopwatch
    }

    /// 开始计时的时刻，停止状态下为 `None`
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn time_provider(&self) -> &T {
        &self.time_provider
    }
}

impl<T: TimeProvider> ElapsedTimer for Stopwatch<T> {
    fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(self.time_provider.now());
        }
    }

    fn stop(&mut self) {
        self.started_at = None;
    }

    fn elapsed(&self) -> Duration {
        match self.started_at {
            // 时钟回退时按零处理
            Some(start) => self
                .time_provider
                .now()
                .checked_duration_since(start)
                .unwrap_or(Duration::from_ticks(0)),
            None => Duration::from_ticks(0),
        }
    }

    fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}
