//! The two blink output lines

use kairos_hal::OutputPin;

use crate::state::{LineAction, Polarity};

/// Primary and secondary output lines driven together
pub struct LinePair<P, S> {
    pub primary: P,
    pub secondary: S,
}

impl<P: OutputPin, S: OutputPin> LinePair<P, S> {
    pub const fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    /// Apply one tick's actions
    pub fn apply(&mut self, (primary, secondary): (LineAction, LineAction)) {
        if primary == LineAction::Toggle {
            self.primary.toggle();
        }
        if secondary == LineAction::Toggle {
            self.secondary.toggle();
        }
    }

    /// Drive both lines to fixed levels
    pub fn force(&mut self, polarity: Polarity) {
        self.primary.set_state(polarity.primary);
        self.secondary.set_state(polarity.secondary);
    }

    /// Current line levels
    pub fn levels(&self) -> Polarity {
        Polarity {
            primary: self.primary.is_set_high(),
            secondary: self.secondary.is_set_high(),
        }
    }
}
