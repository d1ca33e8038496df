//! Delayed-action scheduling and the activation/retraction sequencer

mod actions;
mod sequencer;

pub use actions::{ActionSlot, DelayedActions};
pub use sequencer::Sequencer;
