use embedded_hal::digital::{ErrorType, OutputPin};

use crate::hysteresis::StateChanger;

/// 输出有效电平
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// 高电平为打开（默认）
    #[default]
    High,
    /// 低电平为打开，例如低电平触发的继电器模块
    Low,
}

/// 用 GPIO 引脚实现的输出执行器
///
/// 引脚写入失败只记录日志并计数，不会向滞回输出传播。
pub struct PinOutput<P: OutputPin> {
    pin: P,
    active_level: ActiveLevel,
    state: bool,
    failed_writes: u32,
}

impl<P: OutputPin> PinOutput<P> {
    /// 创建输出并立即把引脚设置为关闭电平
    pub fn new(pin: P, active_level: ActiveLevel) -> Self {
        let mut output = Self {
            pin,
            active_level,
            state: false,
            failed_writes: 0,
        };
        output.write(false);
        output
    }

    /// 最近一次写入的逻辑状态
    pub fn state(&self) -> bool {
        self.state
    }

    pub fn active_level(&self) -> ActiveLevel {
        self.active_level
    }

    /// 引脚写入失败的累计次数
    pub fn failed_writes(&self) -> u32 {
        self.failed_writes
    }

    /// 取回底层引脚
    pub fn release(self) -> P {
        self.pin
    }

    fn write(&mut self, state: bool) {
        let high = match self.active_level {
            ActiveLevel::High => state,
            ActiveLevel::Low => !state,
        };

        let result: Result<(), <P as ErrorType>::Error> = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };

        match result {
            Ok(()) => self.state = state,
            Err(_) => {
                self.failed_writes = self.failed_writes.saturating_add(1);
                warn!(
                    "Failed to drive output pin {} (failures: {})",
                    if state { "ON" } else { "OFF" },
                    self.failed_writes
                );
            }
        }
    }
}

impl<P: OutputPin> StateChanger for PinOutput<P> {
    fn change_state(&mut self, state: bool) {
        self.write(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorKind;

    /// 记录电平的模拟引脚
    #[derive(Default)]
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    /// 总是写入失败的引脚
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn test_new_drives_off_level() {
        let output = PinOutput::new(MockPin { high: true, writes: 0 }, ActiveLevel::High);
        assert!(!output.state());

        let pin = output.release();
        assert!(!pin.high);
        assert_eq!(pin.writes, 1);
    }

    #[test]
    fn test_active_high_mapping() {
        let mut output = PinOutput::new(MockPin::default(), ActiveLevel::High);

        output.change_state(true);
        assert!(output.state());
        assert!(output.pin.high);

        output.change_state(false);
        assert!(!output.pin.high);
    }

    #[test]
    fn test_active_low_mapping() {
        let mut output = PinOutput::new(MockPin::default(), ActiveLevel::Low);
        assert!(output.pin.high, "off level for active-low is high");

        output.change_state(true);
        assert!(output.state());
        assert!(!output.pin.high);
    }

    #[test]
    fn test_failed_writes_are_counted() {
        let mut output = PinOutput::new(BrokenPin, ActiveLevel::High);
        assert_eq!(output.failed_writes(), 1);

        output.change_state(true);
        assert_eq!(output.failed_writes(), 2);
        assert!(!output.state(), "state only follows successful writes");
    }

    #[test]
    fn test_drives_pin_through_latch() {
        use crate::hysteresis::HysteresisOutput;
        use crate::timer::mock_impl::MockTimeProvider;
        use embassy_time::Duration;

        let clock = MockTimeProvider::new();
        let relay = PinOutput::new(MockPin::default(), ActiveLevel::Low);
        let mut latch = HysteresisOutput::new(
            Duration::from_millis(200),
            Duration::from_millis(100),
            clock.clone(),
            relay,
        );

        latch.turn_on();
        clock.advance_millis(100);
        assert_eq!(latch.tick(), Some(true));

        latch.turn_off();
        clock.advance_millis(150);
        assert_eq!(latch.tick(), None);
        clock.advance_millis(50);
        assert_eq!(latch.tick(), Some(false));
    }
}
