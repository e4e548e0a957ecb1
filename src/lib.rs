//! 滞回锁存数字输出
//!
//! 把频繁抖动的布尔输入转换为保证最短稳定时间的布尔输出：输出每次切换后，
//! 至少保持配置的最短时间，无论输入如何快速翻转。
//!
//! ```ignore
//! let mut relay = HysteresisOutput::new(
//!     Duration::from_secs(300),
//!     Duration::from_secs(60),
//!     RealTimeProvider::new(),
//!     PinOutput::new(relay_pin, ActiveLevel::High),
//! );
//!
//! loop {
//!     relay.set_input_state(rain_sensor.is_high());
//!     relay.tick();
//! }
//! ```
#![cfg_attr(not(test), no_std)]

// 必须最先声明，其余模块使用其中的日志宏
mod fmt;

pub mod config;
pub mod hysteresis;
pub mod output;
pub mod timer;
pub mod types;

pub use config::{LatchConfig, StartupPolicy};
pub use hysteresis::{HysteresisOutput, StateChanger};
pub use output::{ActiveLevel, PinOutput};
pub use timer::{ElapsedTimer, RealTimeProvider, Stopwatch, TimeProvider};
pub use types::LatchStatus;
