//! Configuration type definitions
//!
//! Per-deployment constants for the spin sequencer: detection thresholds,
//! the evaluation cadence, and every delayed action's offset from its
//! triggering event. Fixed at build time, never runtime-mutable.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Duty values for a pair of retraction motors
///
/// The two motors drive opposite spools and need slightly different duty
/// values to stay balanced, so every stage carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DutyPair {
    /// Duty for the first retraction motor
    pub motor1: u16,
    /// Duty for the second retraction motor
    pub motor2: u16,
}

impl DutyPair {
    /// Same duty on both motors
    pub const fn both(duty: u16) -> Self {
        Self {
            motor1: duty,
            motor2: duty,
        }
    }
}

/// Errors detected when validating a [`SpinConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Slow threshold must be below the activation threshold
    SlowAboveActivation,
    /// Stop threshold must be below the slow threshold
    StopAboveSlow,
    /// Evaluation interval must be nonzero
    ZeroSampleInterval,
    /// A 2-state machine (no stop threshold) has no normal deactivation
    /// path, so the failsafe deadline is mandatory
    FailsafeRequired,
}

/// Spin sequencer configuration
///
/// `stop_threshold_dps` selects the machine variant: `Some` gives the
/// 3-state machine (Stopped/Spinning/Slowing) with a normal deactivation
/// when rotation drops below the stop threshold; `None` gives the 2-state
/// machine whose terminal deactivation is performed by the failsafe
/// deadline alone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpinConfig {
    /// Rotation speed that triggers activation (deg/s)
    pub activation_threshold_dps: f32,
    /// Rotation speed below which retraction begins (deg/s)
    pub slow_threshold_dps: f32,
    /// Rotation speed below which the prop counts as stopped (deg/s);
    /// `None` selects the 2-state machine
    pub stop_threshold_dps: Option<f32>,
    /// Minimum interval between state machine evaluations (ms)
    pub sample_interval_ms: u64,
    /// Re-arm suppression after activation (ms)
    pub cooldown_ms: u64,
    /// Re-arm suppression after retraction begins (ms)
    pub retraction_cooldown_ms: u64,
    /// Speed-dip rejection window after activation (ms)
    pub min_spin_ms: u64,
    /// Delay from activation to the ignite step (ms, 0 = next poll)
    pub ignite_delay_ms: u64,
    /// How long the clutch stays energized (ms)
    pub clutch_pulse_ms: u64,
    /// Delay from clutch return to the tighten stage (ms)
    pub tighten_delay_ms: u64,
    /// Delay from the tighten stage to the hold-tension stage (ms)
    pub tension_delay_ms: u64,
    /// Delay from retraction start to the deactivation cue (ms)
    pub effect_off_delay_ms: u64,
    /// Delay from retraction start to the forced safe state (ms);
    /// `None` disables the watchdog (only valid for the 3-state machine)
    pub failsafe_ms: Option<u64>,
    /// Duty applied right after the clutch returns
    pub pretension_duty: DutyPair,
    /// Duty for the blade tighten stage
    pub tighten_duty: DutyPair,
    /// Duty held once the blade is tensioned
    pub tension_duty: DutyPair,
    /// Duty while retracting at full power
    pub retraction_duty: DutyPair,
}

impl SpinConfig {
    /// Check threshold ordering and timing constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slow_threshold_dps >= self.activation_threshold_dps {
            return Err(ConfigError::SlowAboveActivation);
        }
        if let Some(stop) = self.stop_threshold_dps {
            if stop >= self.slow_threshold_dps {
                return Err(ConfigError::StopAboveSlow);
            }
        } else if self.failsafe_ms.is_none() {
            return Err(ConfigError::FailsafeRequired);
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        Ok(())
    }
}

impl Default for SpinConfig {
    /// Defaults matching the reference cane prop hardware
    fn default() -> Self {
        Self {
            activation_threshold_dps: 520.0,
            slow_threshold_dps: 320.0,
            stop_threshold_dps: None,
            sample_interval_ms: 300,
            cooldown_ms: 12_000,
            retraction_cooldown_ms: 20_000,
            min_spin_ms: 12_000,
            ignite_delay_ms: 8_000,
            clutch_pulse_ms: 350,
            tighten_delay_ms: 150,
            tension_delay_ms: 50,
            effect_off_delay_ms: 4_500,
            failsafe_ms: Some(5_500),
            pretension_duty: DutyPair {
                motor1: 6_100,
                motor2: 6_200,
            },
            tighten_duty: DutyPair {
                motor1: 5_100,
                motor2: 5_200,
            },
            tension_duty: DutyPair {
                motor1: 1_550,
                motor2: 1_600,
            },
            retraction_duty: DutyPair::both(32_700),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SpinConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_slow_must_be_below_activation() {
        let config = SpinConfig {
            activation_threshold_dps: 300.0,
            slow_threshold_dps: 300.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SlowAboveActivation));
    }

    #[test]
    fn test_stop_must_be_below_slow() {
        let config = SpinConfig {
            stop_threshold_dps: Some(400.0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::StopAboveSlow));
    }

    #[test]
    fn test_two_state_requires_failsafe() {
        let config = SpinConfig {
            stop_threshold_dps: None,
            failsafe_ms: None,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::FailsafeRequired));
    }

    #[test]
    fn test_three_state_may_disable_failsafe() {
        let config = SpinConfig {
            stop_threshold_dps: Some(10.0),
            failsafe_ms: None,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = SpinConfig {
            sample_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSampleInterval));
    }
}
