use embassy_time::Duration;

/// 锁存输出的状态快照，用于诊断与日志
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LatchStatus {
    /// 实际输出状态
    pub output: bool,
    /// 最近一次请求的输入状态
    pub target: bool,
    /// 当前状态已保持的时长
    pub time_in_state: Duration,
    /// 待处理请求距离可以切换还需等待的时长
    pub remaining_hold: Duration,
    /// 待处理请求已经等待的时长，没有待处理请求时为 `None`
    pub pending_for: Option<Duration>,
}

impl LatchStatus {
    pub fn is_pending(&self) -> bool {
        self.output != self.target
    }
}
