//! Effect trigger trait
//!
//! Thin adapter to the external audio/visual subsystem. Calls are
//! fire-and-forget: the sequencer never waits for or depends on their
//! completion.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why the deactivation cue is being sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OffReason {
    /// Normal end of the retraction sequence
    Normal,
    /// Forced off by the failsafe watchdog
    Failsafe,
}

/// Sink for activation/deactivation audio-visual cues
pub trait EffectSink {
    /// Play the activation cue
    fn effect_on(&mut self);

    /// Play the deactivation cue
    fn effect_off(&mut self, reason: OffReason);
}
