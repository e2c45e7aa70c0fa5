//! Analog input conversion

pub mod millivolts;

pub use millivolts::AdcCalibration;
