//! IMU sampling task
//!
//! Reads the LSM6DS3 gyro over async I2C at a fixed rate and publishes
//! decoded samples for the control task. The transfer is the only
//! hardware-specific part; scaling lives in strophe-drivers.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Duration, Ticker, Timer};
use embedded_hal_async::i2c::I2c as AsyncI2c;

use strophe_drivers::gyro::{decode_frame, GyroScale};

use crate::channels::GYRO_READING;

/// LSM6DS3 I2C address (SA0 low)
const IMU_ADDR: u8 = 0x6A;

/// Gyro control register
const CTRL2_G: u8 = 0x11;

/// ODR 104 Hz, full scale ±2000 deg/s
const CTRL2_G_INIT: u8 = 0x4C;

/// First angular-rate output register (OUTX_L_G)
const OUT_G: u8 = 0x22;

/// Read interval in milliseconds
const SAMPLE_INTERVAL_MS: u64 = 10;

const SCALE: GyroScale = GyroScale::Dps2000;

/// IMU task - publishes gyro samples to the control task
#[embassy_executor::task]
pub async fn imu_task(mut i2c: I2c<'static, I2C1, Async>) {
    info!("IMU task started");

    // Retry init until the sensor responds; the prop is useless without it
    loop {
        match i2c.write(IMU_ADDR, &[CTRL2_G, CTRL2_G_INIT]).await {
            Ok(()) => break,
            Err(e) => {
                warn!("IMU init failed: {:?}", Debug2Format(&e));
                Timer::after_millis(100).await;
            }
        }
    }
    info!("IMU configured: 104 Hz, +/-2000 dps");

    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS));

    loop {
        ticker.next().await;

        let mut raw = [0u8; 6];
        match i2c.write_read(IMU_ADDR, &[OUT_G], &mut raw).await {
            Ok(()) => {
                let sample = decode_frame(&raw, SCALE);
                GYRO_READING.signal(sample);
            }
            // Skip the sample; the control task's staleness window reads
            // a prolonged outage as zero rotation
            Err(e) => warn!("IMU read failed: {:?}", Debug2Format(&e)),
        }
    }
}
