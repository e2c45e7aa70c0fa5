//! RP2040-specific HAL for the Kairos firmware
//!
//! This crate provides RP2040 implementations of the `kairos-hal` analog
//! traits:
//!
//! - ADC input bank over the single multiplexed 12-bit converter
//! - PWM-backed analog output (the RP2040 has no DAC)
//!
//! Digital lines need no wrapper here: `embassy_rp::gpio::Output`
//! implements the `embedded-hal` pin traits consumed by
//! `kairos_drivers::LedLine`.

#![no_std]

pub mod adc;
pub mod pwm;

pub use adc::{AdcChannel, RpAdcBank, ADC_RESOLUTION_BITS};
pub use pwm::PwmOutput;
