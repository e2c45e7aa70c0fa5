//! Conversion traits
//!
//! Analog channel and digital line traits live in `kairos-hal`; this module
//! holds the traits that sit between raw readings and reported values.

pub mod convert;

pub use convert::{ideal_millivolts, ConversionError, IdealConverter, SampleConverter};
