// 滞回锁存输出：输出一旦切换，在最短保持时间内不会再次切换
mod changer;


pub use changer::StateChanger;

use embassy_time::Duration;

use crate::config::{LatchConfig, StartupPolicy};
use crate::timer::{ElapsedTimer, Stopwatch, TimeProvider};
use crate::types::LatchStatus;

const ZERO: Duration = Duration::from_ticks(0);

/// 滞回输出
///
/// 接收一个可能频繁抖动的输入状态，产生一个保证最短稳定时间的输出。
/// 输出切换后，该状态至少锁存对应的最短时间（打开后 `minimum_time_on`，
/// 关闭后 `minimum_time_off`）。保持时间从输出实际切换的时刻开始计算，
/// 而不是从请求切换的时刻。
///
/// 典型用法：雨滴传感器每检测到一滴雨产生一个脉冲，继电器在切换后至少保持若干分钟。
///
/// 纯轮询驱动：调用方需要周期性调用 [`tick`](Self::tick)，时间分辨率取决于调用频率。
pub struct HysteresisOutput<E: ElapsedTimer, S: StateChanger> {
    minimum_time_on: Duration,
    minimum_time_off: Duration,
    state_changer: S,
    target_state: bool,
    /// 当前请求与输出不一致的时长
    hysteresis: E,
    time_since_on: E,
    time_since_off: E,
    current_state: bool,
    startup_hold_waived: bool,
}

impl<T: TimeProvider + Clone, S: StateChanger> HysteresisOutput<Stopwatch<T>, S> {
    /// 使用默认启动策略创建滞回输出，初始状态为关闭
    ///
    /// # 参数
    /// - `minimum_time_on`: 打开后至少保持的时长
    /// - `minimum_time_off`: 关闭后至少保持的时长
    /// - `time_provider`: 单调时钟，三个计时器共享
    /// - `state_changer`: 输出实际切换时调用
    pub fn new(
        minimum_time_on: Duration,
        minimum_time_off: Duration,
        time_provider: T,
        state_changer: S,
    ) -> Self {
        Self::from_config(
            &LatchConfig::new(minimum_time_on, minimum_time_off),
            time_provider,
            state_changer,
        )
    }

    pub fn from_config(config: &LatchConfig, time_provider: T, state_changer: S) -> Self {
        Self::with_timers(
            config,
            Stopwatch::new(time_provider.clone()),
            Stopwatch::new(time_provider.clone()),
            Stopwatch::new(time_provider),
            state_changer,
        )
    }
}

impl<E: ElapsedTimer, S: StateChanger> HysteresisOutput<E, S> {
    /// 使用外部提供的计时器创建滞回输出
    pub fn with_timers(
        config: &LatchConfig,
        mut time_since_on: E,
        mut time_since_off: E,
        mut hysteresis: E,
        state_changer: S,
    ) -> Self {
        time_since_on.stop();
        time_since_off.stop();
        hysteresis.stop();

        // 构造时刻视为刚进入初始状态
        if config.initial_state {
            time_since_on.start();
        } else {
            time_since_off.start();
        }

        info!(
            "Hysteresis output created: on={}ms off={}ms initial={}",
            config.minimum_time_on.as_millis(),
            config.minimum_time_off.as_millis(),
            config.initial_state
        );

        Self {
            minimum_time_on: config.minimum_time_on,
            minimum_time_off: config.minimum_time_off,
            state_changer,
            target_state: config.initial_state,
            hysteresis,
            time_since_on,
            time_since_off,
            current_state: config.initial_state,
            startup_hold_waived: config.startup == StartupPolicy::Immediate,
        }
    }

    /// 请求打开输出，可能因滞回而延迟。等价于 `set_input_state(true)`
    pub fn turn_on(&mut self) {
        self.set_input_state(true);
    }

    /// 请求关闭输出，可能因滞回而延迟。等价于 `set_input_state(false)`
    pub fn turn_off(&mut self) {
        self.set_input_state(false);
    }

    /// 设置输入状态
    ///
    /// 只记录目标状态，输出在后续的 [`tick`](Self::tick) 中满足保持时间后才会切换。
    pub fn set_input_state(&mut self, requested_state: bool) {
        if requested_state == self.target_state {
            return;
        }
        self.target_state = requested_state;

        if requested_state != self.current_state {
            self.hysteresis.start();
            debug!("Output change to {} requested", requested_state);
        } else {
            // 请求在生效前被撤回
            self.hysteresis.stop();
            debug!("Pending output change withdrawn, staying {}", self.current_state);
        }
    }

    /// 当前实际输出状态
    pub fn output_state(&self) -> bool {
        self.current_state
    }

    /// 最近一次请求的输入状态
    pub fn target_state(&self) -> bool {
        self.target_state
    }

    /// 必须周期性调用，通常放在主循环中
    ///
    /// 每次调用最多执行一次状态切换。切换发生时返回新的输出状态。
    pub fn tick(&mut self) -> Option<bool> {
        if self.target_state == self.current_state {
            return None;
        }

        if !self.hold_satisfied() {
            return None;
        }

        let held_for = self.held_timer().elapsed();
        self.current_state = self.target_state;
        self.state_changer.change_state(self.current_state);

        // 保持时间从实际切换时刻重新计算
        if self.current_state {
            self.time_since_off.stop();
            self.time_since_on.start();
        } else {
            self.time_since_on.stop();
            self.time_since_off.start();
        }
        self.hysteresis.stop();
        self.startup_hold_waived = false;

        info!(
            "Output switched {} after holding {}ms",
            if self.current_state { "ON" } else { "OFF" },
            held_for.as_millis()
        );

        Some(self.current_state)
    }

    /// 重新设置锁存时间，立即生效，包括正在进行中的保持期
    pub fn set_latch_times(&mut self, minimum_time_on: Duration, minimum_time_off: Duration) {
        self.minimum_time_on = minimum_time_on;
        self.minimum_time_off = minimum_time_off;

        info!(
            "Latch times updated: on={}ms off={}ms",
            minimum_time_on.as_millis(),
            minimum_time_off.as_millis()
        );
    }

    /// `(minimum_time_on, minimum_time_off)`
    pub fn latch_times(&self) -> (Duration, Duration) {
        (self.minimum_time_on, self.minimum_time_off)
    }

    /// 当前输出状态已经保持的时长
    pub fn time_in_state(&self) -> Duration {
        self.held_timer().elapsed()
    }

    /// 是否有尚未生效的切换请求
    pub fn is_pending(&self) -> bool {
        self.target_state != self.current_state
    }

    /// 尚未生效的切换请求已经等待的时长
    pub fn pending_duration(&self) -> Option<Duration> {
        if self.is_pending() {
            Some(self.hysteresis.elapsed())
        } else {
            None
        }
    }

    /// 距离待处理请求可以生效还需等待的时长
    ///
    /// 没有待处理请求或已经可以切换时为零。
    pub fn remaining_hold(&self) -> Duration {
        if !self.is_pending() || self.startup_hold_waived {
            return ZERO;
        }

        self.hysteresis_time()
            .checked_sub(self.held_timer().elapsed())
            .unwrap_or(ZERO)
    }

    pub fn status(&self) -> LatchStatus {
        LatchStatus {
            output: self.current_state,
            target: self.target_state,
            time_in_state: self.time_in_state(),
            remaining_hold: self.remaining_hold(),
            pending_for: self.pending_duration(),
        }
    }

    /// 离开当前状态之前必须保持的时长
    fn hysteresis_time(&self) -> Duration {
        if self.current_state {
            self.minimum_time_on
        } else {
            self.minimum_time_off
        }
    }

    fn held_timer(&self) -> &E {
        if self.current_state {
            &self.time_since_on
        } else {
            &self.time_since_off
        }
    }

    fn hold_satisfied(&self) -> bool {
        self.startup_hold_waived || self.held_timer().has_elapsed(self.hysteresis_time())
    }
}
