//! State machine definition
//!
//! The prop's motion classification is a function of the current state
//! and an event. Guard conditions (thresholds, cooldown, cadence) live in
//! the sequencer; this table only encodes which transitions exist.

use super::events::Event;

/// Spin states
///
/// The 2-state machine variant simply never emits `SlowdownDetected`, so
/// `Slowing` is unreachable there; the table itself covers both variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpinState {
    /// No significant rotation; outputs in the safe state
    #[default]
    Stopped,
    /// Activation threshold crossed; extend sequence armed or running
    Spinning,
    /// Rotation decaying; retraction sequence running
    Slowing,
}

impl SpinState {
    /// Check if the extend/retract mechanism may be energized in this state
    pub fn mechanism_active(&self) -> bool {
        matches!(self, SpinState::Spinning | SpinState::Slowing)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use SpinState::*;

        match (self, event) {
            (Stopped, SpinDetected) => Spinning,

            // 3-state variant: retraction runs in a distinct Slowing state
            (Spinning, SlowdownDetected) => Slowing,
            // 2-state variant: retraction begins and the state folds
            // straight back to Stopped
            (Spinning, StopDetected) => Stopped,

            (Slowing, StopDetected) => Stopped,

            // The watchdog terminates either in-flight state
            (Spinning, FailsafeExpired) => Stopped,
            (Slowing, FailsafeExpired) => Stopped,

            // Default: stay in current state
            _ => self,
        }
    }
}
