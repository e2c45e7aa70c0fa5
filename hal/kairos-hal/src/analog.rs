//! Analog channel abstractions
//!
//! The filter pipeline reads one or more input channels and writes a single
//! output channel. Inputs are grouped in a bank because on most parts every
//! input channel is multiplexed onto one converter.

use crate::setup::Setup;

/// Transient channel errors
///
/// These never abort a task; the affected sample is skipped and the next
/// period retries naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// Conversion did not complete in time
    Timeout,
    /// Converter reported a conversion failure
    Conversion,
    /// Index does not name a configured channel
    NoSuchChannel,
    /// Value does not fit the output resolution
    OutOfRange,
}

/// Static description of one input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSpec {
    /// Hardware channel identifier
    pub id: u8,
    /// Converter resolution in bits
    pub resolution_bits: u8,
    /// Reference voltage in millivolts, if known
    pub reference_mv: Option<u16>,
    /// Differential channels produce signed 16-bit readings
    pub differential: bool,
}

impl ChannelSpec {
    /// Single-ended channel with a known reference voltage
    pub const fn single_ended(id: u8, resolution_bits: u8, reference_mv: u16) -> Self {
        Self {
            id,
            resolution_bits,
            reference_mv: Some(reference_mv),
            differential: false,
        }
    }

    /// Differential channel with a known reference voltage
    pub const fn differential(id: u8, resolution_bits: u8, reference_mv: u16) -> Self {
        Self {
            id,
            resolution_bits,
            reference_mv: Some(reference_mv),
            differential: true,
        }
    }

    /// Interpret a raw reading according to the channel polarity
    pub fn signed_sample(&self, raw: u16) -> i32 {
        if self.differential {
            raw as i16 as i32
        } else {
            raw as i32
        }
    }
}

/// Bank of sampled input channels
pub trait AnalogInputs: Setup {
    /// Channel descriptions, in sampling order
    fn channels(&self) -> &[ChannelSpec];

    /// Take one reading from the channel at `index`
    fn read(&mut self, index: usize) -> Result<u16, ChannelError>;
}

/// Single output channel
pub trait AnalogOutput: Setup {
    /// Output resolution in bits
    fn resolution_bits(&self) -> u8;

    /// Write a raw code, `0..=full_scale()`
    fn write(&mut self, value: u32) -> Result<(), ChannelError>;

    /// Largest code the channel accepts
    fn full_scale(&self) -> u32 {
        match self.resolution_bits() {
            0 => 0,
            bits if bits >= 32 => u32::MAX,
            bits => (1u32 << bits) - 1,
        }
    }
}
