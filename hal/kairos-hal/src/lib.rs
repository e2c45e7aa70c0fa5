//! Kairos Hardware Abstraction Layer
//!
//! This crate defines the hardware boundary of the control core. Chip-specific
//! HALs (currently RP2040) implement these traits so the blink and filter
//! logic in `kairos-core` can run, and be tested, without a board attached.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (kairos-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kairos-core / kairos-drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kairos-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ kairos-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output lines
//! - [`analog::AnalogInputs`] - A bank of sampled input channels
//! - [`analog::AnalogOutput`] - A single output channel of fixed resolution
//! - [`setup::Setup`] - Ready check and one-time channel setup

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod gpio;
pub mod setup;

// Re-export key traits at crate root for convenience
pub use analog::{AnalogInputs, AnalogOutput, ChannelError, ChannelSpec};
pub use gpio::OutputPin;
pub use setup::{bring_up, Setup, SetupError};
