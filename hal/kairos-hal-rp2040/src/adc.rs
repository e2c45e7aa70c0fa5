//! ADC input bank
//!
//! RP2040 has a single ADC with 5 channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//! - ADC4: Internal temperature sensor
//!
//! Reads are blocking: one conversion takes 2 µs, well inside the
//! shortest sample period, and the filter task cannot yield mid-sample.

use embassy_rp::adc::{Adc, Blocking, Channel};
use kairos_hal::{AnalogInputs, ChannelError, ChannelSpec, Setup, SetupError};

/// Native converter resolution
pub const ADC_RESOLUTION_BITS: u8 = 12;

/// ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0 = 0,
    /// ADC1 on GPIO27
    Adc1 = 1,
    /// ADC2 on GPIO28
    Adc2 = 2,
    /// ADC3 on GPIO29
    Adc3 = 3,
    /// Internal temperature sensor
    Temperature = 4,
}

/// Bank of `N` channels sampled in order
pub struct RpAdcBank<'d, const N: usize> {
    adc: Adc<'d, Blocking>,
    channels: [Channel<'d>; N],
    specs: [ChannelSpec; N],
}

impl<'d, const N: usize> RpAdcBank<'d, N> {
    /// Create a bank over already-constructed embassy channels
    ///
    /// `ids[i]` names the hardware channel behind `channels[i]`. The
    /// requested resolution is checked against the converter by
    /// [`Setup::setup`].
    pub fn new(
        adc: Adc<'d, Blocking>,
        channels: [Channel<'d>; N],
        ids: [AdcChannel; N],
        resolution_bits: u8,
        reference_mv: u16,
        differential: bool,
    ) -> Self {
        let specs = ids.map(|id| ChannelSpec {
            id: id as u8,
            resolution_bits,
            reference_mv: Some(reference_mv),
            differential,
        });
        Self {
            adc,
            channels,
            specs,
        }
    }
}

impl<const N: usize> Setup for RpAdcBank<'_, N> {
    fn is_ready(&self) -> bool {
        N > 0
    }

    /// Rejects a resolution other than the native 12 bits, and a bank
    /// that lists the same hardware channel twice
    fn setup(&mut self) -> Result<(), SetupError> {
        for (i, spec) in self.specs.iter().enumerate() {
            if spec.resolution_bits != ADC_RESOLUTION_BITS {
                return Err(SetupError::UnsupportedResolution(spec.resolution_bits));
            }
            if self.specs[..i].iter().any(|s| s.id == spec.id) {
                return Err(SetupError::ChannelRejected { channel: spec.id });
            }
        }
        Ok(())
    }
}

impl<const N: usize> AnalogInputs for RpAdcBank<'_, N> {
    fn channels(&self) -> &[ChannelSpec] {
        &self.specs
    }

    fn read(&mut self, index: usize) -> Result<u16, ChannelError> {
        let channel = self
            .channels
            .get_mut(index)
            .ok_or(ChannelError::NoSuchChannel)?;
        self.adc
            .blocking_read(channel)
            .map_err(|_| ChannelError::Conversion)
    }
}
