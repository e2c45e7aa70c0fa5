//! LED output line
//!
//! Adapts an `embedded-hal` output pin to [`kairos_hal::OutputPin`]. The
//! line can be wired active-high (default) or active-low.

use embedded_hal::digital::{OutputPin as HalOutputPin, PinState};
use kairos_hal::OutputPin;

/// LED driven by a GPIO pin
///
/// "High" at the [`OutputPin`] level always means lit, whatever the
/// wiring. The logical state is tracked here so it can be read without
/// touching the pin.
pub struct LedLine<P> {
    pin: P,
    /// If true, LED lit = pin LOW
    inverted: bool,
    lit: bool,
}

impl<P: HalOutputPin> LedLine<P> {
    /// Create a new LED line and drive it to `lit`
    pub fn new(pin: P, inverted: bool, lit: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            lit: !lit,
        };
        led.set_state(lit);
        led
    }

    /// Active-high LED, initially lit
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false, true)
    }

    /// Active-low LED, initially lit
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true, true)
    }

    fn drive(&mut self, lit: bool) {
        // lit=true, inverted=false → high; lit=true, inverted=true → low
        let level = PinState::from(lit != self.inverted);
        // The state only follows a write the pin accepted
        if self.pin.set_state(level).is_ok() {
            self.lit = lit;
        }
    }
}

impl<P: HalOutputPin> OutputPin for LedLine<P> {
    fn set_high(&mut self) {
        self.drive(true);
    }

    fn set_low(&mut self) {
        self.drive(false);
    }

    fn is_set_high(&self) -> bool {
        self.lit
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_hal::digital::{ErrorType, OutputPin as HalOutputPin};

    use super::*;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
        broken: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                broken: false,
            }
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl embedded_hal::digital::Error for Broken {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl ErrorType for MockPin {
        type Error = Broken;
    }

    impl HalOutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(Broken);
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(Broken);
            }
            self.high = true;
            Ok(())
        }
    }

    struct InfalliblePin(bool);

    impl ErrorType for InfalliblePin {
        type Error = Infallible;
    }

    impl HalOutputPin for InfalliblePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0 = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0 = true;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_led() {
        let mut led = LedLine::new_active_high(MockPin::new());
        assert!(led.is_set_high());
        assert!(led.pin.high);

        led.toggle();
        assert!(!led.is_set_high());
        assert!(!led.pin.high);
    }

    #[test]
    fn test_active_low_led() {
        let mut led = LedLine::new_active_low(MockPin::new());

        // Lit means the pin is pulled low
        assert!(led.is_set_high());
        assert!(!led.pin.high);

        led.set_low();
        assert!(!led.is_set_high());
        assert!(led.pin.high);
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let mut led = LedLine::new_active_high(MockPin::new());
        led.pin.broken = true;
        led.toggle();
        assert!(led.is_set_high());
    }

    #[test]
    fn test_drives_blink_pair() {
        use kairos_core::blink::LinePair;
        use kairos_core::state::BlinkMode;

        let mut lines = LinePair::new(
            LedLine::new_active_high(InfalliblePin(false)),
            LedLine::new_active_high(InfalliblePin(false)),
        );
        lines.force(BlinkMode::OnlySecondary.entry_polarity());
        assert!(!lines.primary.pin.0);
        assert!(lines.secondary.pin.0);
    }
}
