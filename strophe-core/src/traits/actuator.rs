//! Actuator output traits
//!
//! The prop has a fixed set of named output lines: four binary switches
//! and two PWM-capable retraction motors. All control-logic writes go
//! through the [`Actuators`] trait so that the safe state can be asserted
//! as one function instead of being reconstructed from scattered pin writes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum PWM duty value (full power)
pub const MAX_DUTY: u16 = u16::MAX;

/// Binary (on/off) output lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwitchLine {
    /// First LED strip enable
    LedStrip1,
    /// Second LED strip enable
    LedStrip2,
    /// Cane rotation motor enable
    CaneMotor,
    /// Clutch solenoid (energized = released blade)
    Clutch,
}

impl SwitchLine {
    /// All switch lines, for iteration when forcing the safe state
    pub const ALL: [SwitchLine; 4] = [
        SwitchLine::LedStrip1,
        SwitchLine::LedStrip2,
        SwitchLine::CaneMotor,
        SwitchLine::Clutch,
    ];
}

/// PWM-capable output lines (duty 0..=[`MAX_DUTY`])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PwmLine {
    /// First retraction motor
    RetractMotor1,
    /// Second retraction motor
    RetractMotor2,
}

impl PwmLine {
    /// All PWM lines, for iteration when forcing the safe state
    pub const ALL: [PwmLine; 2] = [PwmLine::RetractMotor1, PwmLine::RetractMotor2];
}

/// Trait for the fixed bank of prop outputs
///
/// Writes are idempotent: setting a line to the level it already holds
/// is always allowed and has no further effect. A write either succeeds
/// or the underlying hardware fault is outside this core's responsibility,
/// so the interface is infallible.
pub trait Actuators {
    /// Set a binary line on or off
    fn set_switch(&mut self, line: SwitchLine, on: bool);

    /// Set a PWM line's duty (0 = off, [`MAX_DUTY`] = full power)
    fn set_duty(&mut self, line: PwmLine, duty: u16);
}
