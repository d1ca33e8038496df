//! Strophe - Spin-Triggered Prop Firmware
//!
//! Main firmware binary for the RP2040-based spinning cane prop.
//! Classifies rotation from a gyro and sequences the blade extend and
//! retract hardware: LED strips, retraction motors, cane motor, clutch.
//!
//! Named after the Greek "strophe" meaning "a turning" - the chorus
//! turning about the stage, as the prop turns about its handle.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C1, UART0};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use strophe_core::scheduler::Sequencer;
use strophe_drivers::bank::ActuatorBank;

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C1_IRQ => I2cInterruptHandler<I2C1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Strophe firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Validate the deployment configuration before touching hardware
    let sequencer = match Sequencer::new(config::cane_prop()) {
        Ok(seq) => seq,
        Err(e) => {
            error!("Invalid spin configuration: {:?}", e);
            defmt::panic!("invalid spin configuration");
        }
    };
    info!("Spin configuration validated");

    // Binary output lines
    let led_strip1 = Output::new(p.PIN_2, Level::Low);
    let led_strip2 = Output::new(p.PIN_3, Level::Low);
    let cane_motor = Output::new(p.PIN_4, Level::Low);
    let clutch = Output::new(p.PIN_5, Level::Low);

    // Retraction motors share PWM slice 3: GPIO6 = channel A, GPIO7 = B.
    // Full 16-bit top gives ~1.9 kHz at the 125 MHz system clock.
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = 0xFFFF;
    let pwm = Pwm::new_output_ab(p.PWM_SLICE3, p.PIN_6, p.PIN_7, pwm_config);
    let (retract1, retract2) = pwm.split();

    let bank = ActuatorBank::new(
        led_strip1,
        led_strip2,
        cane_motor,
        clutch,
        retract1.unwrap(),
        retract2.unwrap(),
    );
    info!("Actuator bank initialized");

    // IMU on I2C1 (GPIO14 SDA, GPIO15 SCL)
    let i2c = I2c::new_async(p.I2C1, p.PIN_15, p.PIN_14, Irqs, i2c::Config::default());
    info!("I2C initialized for IMU");

    // Effects board on UART0 (115200 baud default)
    let uart_config = UartConfig::default();
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();
    info!("UART initialized for effects board");

    // Spawn tasks
    spawner.spawn(tasks::imu_task(i2c)).unwrap();
    spawner.spawn(tasks::effects_task(tx)).unwrap();
    spawner.spawn(tasks::control_task(bank, sequencer)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
