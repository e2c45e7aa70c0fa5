//! GPIO pin abstractions
//!
//! Digital lines driven by the blink controller and the mode button
//! handler. The button input itself is awaited through the chip HAL's
//! async edge wait and needs no trait here.

/// Digital output line
///
/// Implementations handle the register access for the specific chip, or
/// adapt an `embedded-hal` pin (see `kairos_drivers::led::LedLine`).
pub trait OutputPin {
    /// Drive the line to its active level
    fn set_high(&mut self);

    /// Drive the line to its inactive level
    fn set_low(&mut self);

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool;

    /// Toggle the line
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Drive the line to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high()
    }

    fn set_low(&mut self) {
        (**self).set_low()
    }

    fn is_set_high(&self) -> bool {
        (**self).is_set_high()
    }

    fn toggle(&mut self) {
        (**self).toggle()
    }
}
