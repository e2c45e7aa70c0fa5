//! Board-agnostic core logic for the Kairos controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Configuration types and validation
//! - Blink mode state machine and the state shared between contexts
//! - Blink controller and mode button handling
//! - Moving-average ADC to DAC filter pipeline
//! - Task descriptions and runtime counters
//! - Operator command surface

#![no_std]
#![deny(unsafe_code)]

pub mod blink;
pub mod config;
pub mod control;
pub mod filter;
pub mod state;
pub mod tasks;
pub mod traits;
