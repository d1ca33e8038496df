//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in strophe-core for the prop hardware:
//!
//! - Actuator bank (GPIO switches + PWM retraction motors)
//! - Gyro frame decoding (raw angular rate registers to deg/s)

#![no_std]
#![deny(unsafe_code)]

pub mod bank;
pub mod gyro;
