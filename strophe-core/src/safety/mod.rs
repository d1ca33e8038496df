//! Safe-state definition
//!
//! Every terminal path (startup, normal deactivation, failsafe abort)
//! drives the hardware to the same place through this one function, so
//! "safe" is asserted here and tested once instead of being reconstructed
//! by auditing every call site.

use crate::traits::{Actuators, PwmLine, SwitchLine};

/// Drive every output to its de-energized rest position
///
/// LED strips off, retraction motors at zero duty, cane rotation motor
/// off, clutch released.
pub fn apply_safe_state(outputs: &mut impl Actuators) {
    for line in SwitchLine::ALL {
        outputs.set_switch(line, false);
    }
    for line in PwmLine::ALL {
        outputs.set_duty(line, 0);
    }
}
