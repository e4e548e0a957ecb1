use core::cmp::{max, min};

use embassy_futures::select::{select, Either};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Output;
use embassy_time::{Duration, Timer};
use hysteresis_output::{
    ElapsedTimer, HysteresisOutput, LatchConfig, PinOutput, RealTimeProvider, Stopwatch,
};

use crate::shared::{OUTPUT_STATE_CHANNEL, POLL_PERIOD, RAIN_HOLD, STATUS_REPORT_INTERVAL};

type RelayLatch<'d> = HysteresisOutput<Stopwatch<RealTimeProvider>, PinOutput<Output<'d>>>;

/// 继电器管理器
///
/// 根据雨滴传感器控制继电器：
/// - 传感器脉冲（高电平）视为下雨，最后一次脉冲后 `RAIN_HOLD` 内仍视为下雨
/// - 继电器由滞回输出驱动，保证最短开启/关闭时间
pub struct RelayManager<'d> {
    sensor: ExtiInput<'d>,
    latch: RelayLatch<'d>,
    since_last_drop: Stopwatch<RealTimeProvider>,
    tick_counter: u32,
}

impl<'d> RelayManager<'d> {
    pub fn new(sensor: ExtiInput<'d>, relay: PinOutput<Output<'d>>, config: &LatchConfig) -> Self {
        defmt::info!("🌧️ Relay Manager initialized");
        defmt::info!("   Minimum on: {}s", config.minimum_time_on.as_secs());
        defmt::info!("   Minimum off: {}s", config.minimum_time_off.as_secs());
        defmt::info!("   Rain hold: {}s", RAIN_HOLD.as_secs());

        OUTPUT_STATE_CHANNEL.sender().send(config.initial_state);

        Self {
            sensor,
            latch: HysteresisOutput::from_config(config, RealTimeProvider::new(), relay),
            since_last_drop: Stopwatch::new(RealTimeProvider::new()),
            tick_counter: 0,
        }
    }

    /// 执行一次采样与锁存检查
    pub fn tick(&mut self) {
        self.tick_counter = self.tick_counter.wrapping_add(1);

        if self.sensor.is_high() {
            self.record_drop();
        }

        let raining =
            self.since_last_drop.is_running() && !self.since_last_drop.has_elapsed(RAIN_HOLD);
        if !raining && self.since_last_drop.is_running() {
            defmt::info!("☀️ No rain for {}s", RAIN_HOLD.as_secs());
            self.since_last_drop.stop();
        }

        self.latch.set_input_state(raining);

        if let Some(state) = self.latch.tick() {
            OUTPUT_STATE_CHANNEL.sender().send(state);
        }

        if self.tick_counter % STATUS_REPORT_INTERVAL == 0 {
            defmt::info!("Relay status: {}", self.latch.status());
        }
    }

    /// 等待下一次传感器上升沿或下一个检查时刻
    pub async fn wait_next(&mut self) {
        let deadline = self.next_check();

        match select(self.sensor.wait_for_rising_edge(), Timer::after(deadline)).await {
            Either::First(_) => self.record_drop(),
            Either::Second(_) => {}
        }
    }

    /// 有待处理请求时提前醒来，避免保持时间到期后多等一个周期
    fn next_check(&self) -> Duration {
        if self.latch.is_pending() {
            max(min(POLL_PERIOD, self.latch.remaining_hold()), Duration::from_millis(1))
        } else {
            POLL_PERIOD
        }
    }

    fn record_drop(&mut self) {
        if !self.since_last_drop.is_running() {
            defmt::info!("🌧️ Rain detected");
        }
        // 每一滴雨都重新开始计时
        self.since_last_drop.restart();
    }

    pub fn output_state(&self) -> bool {
        self.latch.output_state()
    }
}
