use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, watch::Watch};
use embassy_time::Duration;

// 锁存时间：雨停后继电器至少保持 5 分钟，关闭后至少 1 分钟才允许再次打开
pub const MINIMUM_TIME_ON: Duration = Duration::from_secs(300);
pub const MINIMUM_TIME_OFF: Duration = Duration::from_secs(60);

// 最后一滴雨之后仍视为下雨的时长
pub const RAIN_HOLD: Duration = Duration::from_secs(30);

// 轮询周期，决定锁存时间的分辨率
pub const POLL_PERIOD: Duration = Duration::from_millis(10);

// 每隔多少次轮询打印一次状态（约 1 分钟）
pub const STATUS_REPORT_INTERVAL: u32 = 6000;

// 继电器实际输出状态通道
pub(crate) static OUTPUT_STATE_CHANNEL: Watch<CriticalSectionRawMutex, bool, 1> = Watch::new();
