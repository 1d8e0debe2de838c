//! Tripwire - Fault Supervisor Firmware
//!
//! Main firmware binary for the Raspberry Pi Pico.
//!
//! A debounced button acknowledges a watchdog. Each watchdog period that
//! passes without a press is counted in emulated EEPROM; at the configured
//! limit the system locks down: button, debounce timer and PWM are shut off
//! and only a blinking indicator remains. Meanwhile the main loop dims an
//! LED group by software PWM following a potentiometer.
//!
//! Interrupt vectors are tasks on a high-priority interrupt executor; the
//! PWM loop runs in thread mode underneath them.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::InterruptExecutor;
use embassy_futures::block_on;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::uart::{Config as UartConfig, UartTx};
use embassy_rp::watchdog::Watchdog;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use tripwire_core::{Peripherals, Supervisor};
use tripwire_drivers::{FlashEeprom, Led, LedGroup};
use tripwire_hal_rp2040::{eeprom_flash, AdcInput, PinOutput, UartConsole, EEPROM_RANGE};

use crate::board::{PicoBoard, BUTTON_PIN};
use crate::channels::{BUTTON_EDGE, DEBOUNCE_TICK, EEPROM, HEARTBEAT_TICK, SUPERVISOR, WATCHDOG};

mod board;
mod channels;
mod config;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit firmware.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../firmware.toml");

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("Tripwire firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load(EMBEDDED_CONFIG);
    let sup_config = config.supervisor;

    // Emulated EEPROM: load the last committed image before anything reads it
    let mut eeprom = FlashEeprom::new(eeprom_flash(p.FLASH, p.DMA_CH0), EEPROM_RANGE, &EEPROM);
    match block_on(eeprom.load()) {
        Ok(true) => info!("EEPROM image loaded"),
        Ok(false) => info!("EEPROM partition empty"),
        Err(e) => {
            error!("EEPROM partition unreadable: {}, formatting", e);
            if let Err(e) = block_on(eeprom.format()) {
                error!("EEPROM format failed: {}", e);
            }
        }
    }

    // Console on UART0
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.console.baudrate;
    let tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);

    // PWM-driven LED group
    let mut pwm_leds = LedGroup::new();
    for pin in [
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        Output::new(p.PIN_18, Level::Low),
    ] {
        if pwm_leds.push(Led::new_active_high(PinOutput::new(pin))).is_err() {
            warn!("PWM LED group full");
        }
    }

    // Potentiometer setting the duty cycle
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let pot = AdcChannel::new_pin(p.PIN_26, Pull::None);

    // Button to ground, internal pull-up
    let button = Input::new(p.PIN_13, Pull::Up);

    let peripherals = Peripherals::<PicoBoard> {
        button: BUTTON_EDGE.level(),
        button_id: BUTTON_PIN,
        button_active_low: true,
        edge_line: BUTTON_EDGE.line(),
        debounce_tick: DEBOUNCE_TICK.line(sup_config.debounce.tick_us),
        heartbeat_tick: HEARTBEAT_TICK.line(sup_config.heartbeat.tick_us),
        fault_timer: WATCHDOG.timer(),
        store: EEPROM.store(),
        console: UartConsole::new(tx),
        indicator: PinOutput::new(Output::new(p.PIN_25, Level::Low)),
        pwm_output: pwm_leds,
        analog: AdcInput::new(adc, pot),
    };

    let supervisor = unwrap!(Supervisor::new(peripherals, &sup_config));
    SUPERVISOR.init(supervisor);

    match SUPERVISOR.with(|s| s.start()) {
        Some(Ok(state)) => info!("Supervisor started: {}", state),
        Some(Err(e)) => error!("Fault counter unreadable: {}", e),
        None => {}
    }
    if let Some(status) = SUPERVISOR.with(|s| s.status()) {
        info!("Status: {}", status);
    }

    // Vector tasks preempt the main loop
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    spawner.spawn(tasks::edge_task(button)).unwrap();
    spawner
        .spawn(tasks::debounce_task(sup_config.debounce.tick_us))
        .unwrap();
    spawner
        .spawn(tasks::heartbeat_task(sup_config.heartbeat.tick_us))
        .unwrap();
    spawner
        .spawn(tasks::watchdog_task(Watchdog::new(p.WATCHDOG)))
        .unwrap();
    spawner.spawn(tasks::eeprom_task(eeprom)).unwrap();

    info!("All tasks spawned, firmware running");

    let mut delay = Delay;
    loop {
        // Sleep until the next interrupt while PWM is off (lockdown)
        if !SUPERVISOR.run_pwm(&mut delay) {
            cortex_m::asm::wfi();
        }
    }
}
