#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_stm32::{
    exti::ExtiInput,
    gpio::{Level, Output, Pull, Speed},
};
use hysteresis_output::{ActiveLevel, LatchConfig, PinOutput, StartupPolicy};
use relay_manager::RelayManager;
use shared::*;

mod relay_manager;
mod shared;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.pll = Some(Pll {
            source: PllSource::HSI,
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL85,
            divp: None,
            divq: None,
            // Main system clock at 170 MHz
            divr: Some(PllRDiv::DIV2),
        });
        config.rcc.sys = Sysclk::PLL1_R;
    }
    let p = embassy_stm32::init(config);
    defmt::info!("STM32 initialized successfully");

    // PB8: 雨滴传感器输入，高电平有效
    let rain_sensor = ExtiInput::new(p.PB8, p.EXTI8, Pull::Down);
    defmt::info!("Rain sensor pin PB8 configured");

    // PB10: 继电器控制，高电平吸合
    let relay_pin = Output::new(p.PB10, Level::Low, Speed::Low);
    let relay = PinOutput::new(relay_pin, ActiveLevel::High);
    defmt::info!("Relay pin PB10 configured");

    // 上电时继电器关闭，需先满足最短关闭时间，防止复位后频繁吸合
    let latch_config = LatchConfig::new(MINIMUM_TIME_ON, MINIMUM_TIME_OFF)
        .with_initial_state(false)
        .with_startup(StartupPolicy::HoldInitialState);
    defmt::info!("Latch config: {}", latch_config);

    let relay_manager = RelayManager::new(rain_sensor, relay, &latch_config);
    defmt::info!(
        "Relay manager created, output: {}",
        relay_manager.output_state()
    );

    spawner.spawn(status_task()).unwrap();
    spawner.spawn(relay_task(relay_manager)).unwrap();

    defmt::info!("Relay control task started");
}

#[embassy_executor::task]
async fn relay_task(mut relay_manager: RelayManager<'static>) {
    loop {
        relay_manager.tick();
        relay_manager.wait_next().await;
    }
}

#[embassy_executor::task]
async fn status_task() {
    let Some(mut state_rx) = OUTPUT_STATE_CHANNEL.receiver() else {
        defmt::panic!("Failed to subscribe to relay output state");
    };

    loop {
        let state = state_rx.changed().await;
        if state {
            defmt::info!("🔌 Relay ENGAGED");
        } else {
            defmt::info!("🛑 Relay RELEASED");
        }
    }
}
