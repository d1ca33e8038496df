//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, Ordering};

use strophe_core::motion::RotationSample;
use strophe_core::traits::OffReason;

/// Effect cue for the external sound/light board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EffectCommand {
    /// Ignition cue
    On,
    /// Deactivation cue with the reason the cycle ended
    Off(OffReason),
}

/// Latest gyro sample (updated by the IMU task)
pub static GYRO_READING: Signal<CriticalSectionRawMutex, RotationSample> = Signal::new();

/// Effect cue signal (updated by the control task)
pub static EFFECT_CMD: Signal<CriticalSectionRawMutex, EffectCommand> = Signal::new();

/// Engagement flag mirrored out of the sequencer after every poll
static ENGAGED: AtomicBool = AtomicBool::new(false);

/// Publish the sequencer's engagement state
pub fn set_engaged(on: bool) {
    ENGAGED.store(on, Ordering::Relaxed);
}

/// Whether the prop is currently engaged
///
/// Readable from any task; the external effect firmware queries this to
/// gate its own animations.
pub fn is_on() -> bool {
    ENGAGED.load(Ordering::Relaxed)
}
