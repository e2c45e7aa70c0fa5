//! PWM-backed analog output
//!
//! A PWM slice with `top = 2^bits - 1` and the compare level set to the
//! output code gives a duty cycle proportional to the code. An external
//! RC low-pass turns it into a voltage.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use kairos_hal::{AnalogOutput, ChannelError, Setup, SetupError};

/// Analog output on PWM channel A of one slice
pub struct PwmOutput<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
    bits: u8,
}

impl<'d> PwmOutput<'d> {
    /// Wrap a slice configured with `Pwm::new_output_a`
    ///
    /// The counter range is programmed by [`Setup::setup`].
    pub fn new(pwm: Pwm<'d>, resolution_bits: u8) -> Self {
        Self {
            pwm,
            config: PwmConfig::default(),
            bits: resolution_bits,
        }
    }
}

impl Setup for PwmOutput<'_> {
    fn is_ready(&self) -> bool {
        true
    }

    fn setup(&mut self) -> Result<(), SetupError> {
        // 16-bit counter
        if self.bits == 0 || self.bits > 16 {
            return Err(SetupError::UnsupportedResolution(self.bits));
        }
        self.config.top = self.full_scale() as u16;
        self.config.compare_a = 0;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}

impl AnalogOutput for PwmOutput<'_> {
    fn resolution_bits(&self) -> u8 {
        self.bits
    }

    fn write(&mut self, value: u32) -> Result<(), ChannelError> {
        if value > self.full_scale() {
            return Err(ChannelError::OutOfRange);
        }
        self.config.compare_a = value as u16;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}
