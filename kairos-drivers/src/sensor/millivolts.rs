//! Calibrated millivolt conversion
//!
//! Applies a linear board correction on top of the ideal converter
//! transfer function:
//!
//! ```text
//! mv = ideal(raw) * gain_permille / 1000 + offset_mv
//! ```

use kairos_core::config::SamplingConfig;
use kairos_core::traits::{ideal_millivolts, ConversionError, SampleConverter};
use kairos_hal::ChannelSpec;

/// Linear calibration of an input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcCalibration {
    /// Added after scaling (mV)
    pub offset_mv: i32,
    /// Scale in thousandths (1000 = unity)
    pub gain_permille: u16,
}

impl Default for AdcCalibration {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AdcCalibration {
    /// No correction
    pub const IDENTITY: Self = Self {
        offset_mv: 0,
        gain_permille: 1000,
    };

    pub const fn from_config(sampling: &SamplingConfig) -> Self {
        Self {
            offset_mv: sampling.offset_mv,
            gain_permille: sampling.gain_permille,
        }
    }

    /// Apply the correction to an ideal millivolt value
    pub fn correct(&self, mv: i32) -> Result<i32, ConversionError> {
        let scaled = mv as i64 * self.gain_permille as i64 / 1000;
        let corrected = scaled + self.offset_mv as i64;
        i32::try_from(corrected).map_err(|_| ConversionError::Overflow)
    }
}

impl SampleConverter for AdcCalibration {
    fn to_millivolts(&self, spec: &ChannelSpec, raw: i32) -> Result<i32, ConversionError> {
        let ideal = ideal_millivolts(spec, raw)?;
        self.correct(ideal)
    }
}
