//! Events that trigger state transitions

/// Events that can trigger spin state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Rotation speed crossed the activation threshold
    SpinDetected,
    /// Rotation speed dropped below the slow threshold
    SlowdownDetected,
    /// Rotation speed dropped below the stop threshold
    StopDetected,
    /// The failsafe watchdog expired before normal deactivation
    FailsafeExpired,
}

impl Event {
    /// Check if this event comes from the rotation sensor path
    pub fn is_sensor_event(&self) -> bool {
        matches!(
            self,
            Event::SpinDetected | Event::SlowdownDetected | Event::StopDetected
        )
    }

    /// Check if this event terminates the current cycle
    pub fn is_terminal_event(&self) -> bool {
        matches!(self, Event::StopDetected | Event::FailsafeExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_events() {
        assert!(Event::SpinDetected.is_sensor_event());
        assert!(Event::StopDetected.is_sensor_event());
        assert!(!Event::FailsafeExpired.is_sensor_event());
    }

    #[test]
    fn test_terminal_events() {
        assert!(Event::StopDetected.is_terminal_event());
        assert!(Event::FailsafeExpired.is_terminal_event());
        assert!(!Event::SpinDetected.is_terminal_event());
        assert!(!Event::SlowdownDetected.is_terminal_event());
    }
}
