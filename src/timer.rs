// 计时模块：可注入的时钟与秒表，替代全局定时器，便于在测试中使用确定性时钟
mod real_impl;
mod stopwatch;
mod traits;

#[cfg(test)]
pub(crate) mod mock_impl;

pub use real_impl::RealTimeProvider;
pub use stopwatch::Stopwatch;
pub use traits::{ElapsedTimer, TimeProvider};
