//! Board-agnostic control logic for the Strophe spinning prop firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (actuator bank, effect sink)
//! - Motion sampling (gyro magnitude, staleness handling)
//! - Spin state machine
//! - Delayed-action scheduler and activation/retraction sequencer
//! - Safe-state definition
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod motion;
pub mod safety;
pub mod scheduler;
pub mod state;
pub mod traits;
