use embassy_time::Instant;

use super::traits::TimeProvider;

/// 真实硬件时间提供者
/// 使用embassy_time的单调时钟
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RealTimeProvider;

impl RealTimeProvider {
    pub const fn new() -> Self {
        Self
    }
}

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
