//! Raw sample to physical unit conversion

use kairos_hal::ChannelSpec;

/// Errors that can occur converting a raw sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionError {
    /// Channel has no reference voltage configured
    NoReference,
    /// Result does not fit the output type
    Overflow,
}

/// Converts raw channel readings to millivolts
///
/// Implementations may apply a board calibration on top of the ideal
/// transfer function given by [`ideal_millivolts`].
pub trait SampleConverter {
    /// Convert a signed raw reading taken on `spec`
    fn to_millivolts(&self, spec: &ChannelSpec, raw: i32) -> Result<i32, ConversionError>;
}

/// Ideal converter transfer function
///
/// `mv = raw * vref_mv / 2^bits`, with a 64-bit intermediate. `bits` is the
/// channel resolution, less one on differential channels where the top bit
/// carries the sign.
pub fn ideal_millivolts(spec: &ChannelSpec, raw: i32) -> Result<i32, ConversionError> {
    let vref = spec.reference_mv.ok_or(ConversionError::NoReference)?;
    let bits = if spec.differential {
        spec.resolution_bits.saturating_sub(1)
    } else {
        spec.resolution_bits
    };
    if bits >= 63 {
        return Err(ConversionError::Overflow);
    }
    let scaled = (raw as i64 * vref as i64) >> bits;
    i32::try_from(scaled).map_err(|_| ConversionError::Overflow)
}

/// Converter that applies the ideal transfer function unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdealConverter;

impl SampleConverter for IdealConverter {
    fn to_millivolts(&self, spec: &ChannelSpec, raw: i32) -> Result<i32, ConversionError> {
        ideal_millivolts(spec, raw)
    }
}
