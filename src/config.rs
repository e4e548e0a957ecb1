use embassy_time::Duration;

/// 上电后第一次状态切换的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupPolicy {
    /// 把构造时刻视为刚刚进入初始状态，第一次切换同样需要等待保持时间
    #[default]
    HoldInitialState,
    /// 构造后的第一次切换不受保持时间限制，之后的切换照常
    Immediate,
}

/// 滞回输出配置
///
/// - `minimum_time_on`: 输出打开后至少保持的时长，之后才允许关闭
/// - `minimum_time_off`: 输出关闭后至少保持的时长，之后才允许打开
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LatchConfig {
    pub minimum_time_on: Duration,
    pub minimum_time_off: Duration,
    /// 初始输出状态，不会触发回调
    pub initial_state: bool,
    pub startup: StartupPolicy,
}

impl LatchConfig {
    pub const fn new(minimum_time_on: Duration, minimum_time_off: Duration) -> Self {
        Self {
            minimum_time_on,
            minimum_time_off,
            initial_state: false,
            startup: StartupPolicy::HoldInitialState,
        }
    }

    pub const fn with_initial_state(mut self, initial_state: bool) -> Self {
        self.initial_state = initial_state;
        self
    }

    pub const fn with_startup(mut self, startup: StartupPolicy) -> Self {
        self.startup = startup;
        self
    }

    /// 离开 `state` 之前必须保持的时长
    pub const fn hold_time(&self, state: bool) -> Duration {
        if state {
            self.minimum_time_on
        } else {
            self.minimum_time_off
        }
    }
}

impl Default for LatchConfig {
    /// 默认配置：
    /// - 最短开启: 5s
    /// - 最短关闭: 10s
    /// - 初始关闭，上电即开始计算关闭保持时间
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LatchConfig::default();

        assert_eq!(config.minimum_time_on, Duration::from_secs(5));
        assert_eq!(config.minimum_time_off, Duration::from_secs(10));
        assert!(!config.initial_state);
        assert_eq!(config.startup, StartupPolicy::HoldInitialState);
    }

    #[test]
    fn test_hold_time_guards_the_state_being_left() {
        let config = LatchConfig::new(Duration::from_millis(300), Duration::from_millis(700));

        assert_eq!(config.hold_time(true), Duration::from_millis(300));
        assert_eq!(config.hold_time(false), Duration::from_millis(700));
    }

    #[test]
    fn test_builders() {
        let config = LatchConfig::default()
            .with_initial_state(true)
            .with_startup(StartupPolicy::Immediate);

        assert!(config.initial_state);
        assert_eq!(config.startup, StartupPolicy::Immediate);
        assert_eq!(config.minimum_time_on, Duration::from_secs(5));
    }
}
