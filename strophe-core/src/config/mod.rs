//! Configuration types and validation

mod types;

pub use types::{ConfigError, DutyPair, SpinConfig};
