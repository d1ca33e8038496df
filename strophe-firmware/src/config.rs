//! Deployment configuration
//!
//! The sequencer constants are fixed at build time; edit the preset and
//! rebuild to retune. Values are validated once at startup before any
//! task is spawned.

use strophe_core::config::{DutyPair, SpinConfig};

/// Configuration for the reference cane prop hardware
///
/// 2-state machine: retraction begins below the slow threshold and the
/// failsafe deadline performs the terminal deactivation.
pub const fn cane_prop() -> SpinConfig {
    SpinConfig {
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
