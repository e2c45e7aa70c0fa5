//! Driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in kairos-hal and kairos-core:
//!
//! - LED lines over `embedded-hal` output pins
//! - Calibrated millivolt conversion for analog inputs

#![no_std]
#![deny(unsafe_code)]

pub mod led;
pub mod sensor;

pub use led::LedLine;
pub use sensor::AdcCalibration;
