//! Spin control task
//!
//! Owns the motion sampler, the sequencer and the actuator bank. Runs a
//! fixed 10 ms loop: fold in the latest gyro sample, compute the rotation
//! speed, poll the sequencer, and mirror the engagement flag out for the
//! other tasks.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Instant, Ticker};

use strophe_core::motion::Sampler;
use strophe_core::safety;
use strophe_core::scheduler::Sequencer;
use strophe_core::traits::{EffectSink, OffReason};
use strophe_drivers::bank::ActuatorBank;

use crate::channels::{set_engaged, EffectCommand, EFFECT_CMD, GYRO_READING};

/// Control loop interval in milliseconds
///
/// Well below the sequencer's evaluation cadence so delayed actions fire
/// close to their deadlines.
pub const CONTROL_INTERVAL_MS: u64 = 10;

/// Concrete bank type for the RP2040 pinout
pub type Bank = ActuatorBank<Output<'static>, PwmOutput<'static>>;

/// Forwards sequencer cues to the effects task
struct CueForwarder;

impl EffectSink for CueForwarder {
    fn effect_on(&mut self) {
        EFFECT_CMD.signal(EffectCommand::On);
    }

    fn effect_off(&mut self, reason: OffReason) {
        EFFECT_CMD.signal(EffectCommand::Off(reason));
    }
}

/// Control task - drives the sequencer from gyro samples
#[embassy_executor::task]
pub async fn control_task(mut bank: Bank, mut sequencer: Sequencer) {
    info!("Control task started");

    // Known output state before the first poll
    safety::apply_safe_state(&mut bank);

    let mut sampler = Sampler::default();
    let mut effects = CueForwarder;
    let start = Instant::now();
    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_INTERVAL_MS));

    loop {
        ticker.next().await;
        let now_ms = start.elapsed().as_millis();

        // Non-blocking: a missing sample goes stale in the sampler rather
        // than stalling the loop
        if let Some(sample) = GYRO_READING.try_take() {
            sampler.update(sample, now_ms);
        }

        let speed = sampler.speed(now_ms);
        sequencer.poll(now_ms, speed, &mut bank, &mut effects);
        set_engaged(sequencer.is_on());
    }
}
