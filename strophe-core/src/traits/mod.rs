//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic
//! and hardware-specific implementations.

pub mod actuator;
pub mod effect;

pub use actuator::{Actuators, PwmLine, SwitchLine, MAX_DUTY};
pub use effect::{EffectSink, OffReason};
