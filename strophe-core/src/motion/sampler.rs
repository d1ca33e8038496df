//! Rotation sampling and staleness handling
//!
//! The sampler holds the most recent fused gyro vector pushed in by the
//! sensor front-end and reports the rotation magnitude on demand. A sensor
//! that stops delivering samples degrades to a speed of zero, which steers
//! the state machine toward the Stopped path; the failsafe deadline is the
//! backstop for anything already in flight.

use libm::sqrtf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Drop to zero speed if the sensor has been silent this long (ms)
pub const DEFAULT_MAX_SAMPLE_AGE_MS: u64 = 500;

/// Three-axis angular velocity in degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotationSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationSample {
    /// Euclidean norm of the three axes (deg/s, always >= 0)
    pub fn magnitude(&self) -> f32 {
        sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Holds the latest rotation sample and its arrival time
#[derive(Debug, Clone)]
pub struct Sampler {
    last: Option<RotationSample>,
    updated_at_ms: u64,
    max_age_ms: u64,
}

impl Sampler {
    /// Create a sampler with the given staleness window
    pub fn new(max_age_ms: u64) -> Self {
        Self {
            last: None,
            updated_at_ms: 0,
            max_age_ms,
        }
    }

    /// Record a fresh sample
    pub fn update(&mut self, sample: RotationSample, now_ms: u64) {
        self.last = Some(sample);
        self.updated_at_ms = now_ms;
    }

    /// Current rotation speed (deg/s)
    ///
    /// Returns 0.0 when no sample has arrived yet or the latest one is
    /// older than the staleness window.
    pub fn speed(&self, now_ms: u64) -> f32 {
        match self.last {
            Some(sample) if now_ms.saturating_sub(self.updated_at_ms) <= self.max_age_ms => {
                sample.magnitude()
            }
            _ => 0.0,
        }
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SAMPLE_AGE_MS)
    }
}
