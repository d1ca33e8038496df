//! Motion sampling
//!
//! Reduces the fused gyroscope vector to the scalar rotation speed the
//! state machine consumes.

mod sampler;

pub use sampler::{RotationSample, Sampler, DEFAULT_MAX_SAMPLE_AGE_MS};
