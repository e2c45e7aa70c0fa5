//! Blink mode state machine
//!
//! The mode is advanced by the button edge handler and read by the blink
//! task on every tick. It is finite and cyclic: every edge moves to the
//! successor, and the fourth edge wraps back to the start.

/// Blink modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BlinkMode {
    /// Both lines blink in opposite phase
    #[default]
    Alternating = 0,
    /// Only the primary line blinks
    OnlyPrimary = 1,
    /// Only the secondary line blinks
    OnlySecondary = 2,
    /// Both lines blink in phase
    Synchronized = 3,
}

/// What a blink tick does to one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineAction {
    Toggle,
    Hold,
}

/// Line levels forced when a mode is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Polarity {
    pub primary: bool,
    pub secondary: bool,
}

impl BlinkMode {
    /// Every mode, in cycle order
    pub const ALL: [BlinkMode; 4] = [
        BlinkMode::Alternating,
        BlinkMode::OnlyPrimary,
        BlinkMode::OnlySecondary,
        BlinkMode::Synchronized,
    ];

    /// Decode from the two low bits of a stored word
    ///
    /// Total over `u8`: there is no encoding that maps outside the four
    /// modes, so a reader can never observe an invalid mode.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => BlinkMode::Alternating,
            1 => BlinkMode::OnlyPrimary,
            2 => BlinkMode::OnlySecondary,
            _ => BlinkMode::Synchronized,
        }
    }

    /// Encode for atomic storage
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Mode entered on the next button edge
    pub const fn successor(self) -> Self {
        match self {
            BlinkMode::Alternating => BlinkMode::OnlyPrimary,
            BlinkMode::OnlyPrimary => BlinkMode::OnlySecondary,
            BlinkMode::OnlySecondary => BlinkMode::Synchronized,
            BlinkMode::Synchronized => BlinkMode::Alternating,
        }
    }

    /// Per-tick action for (primary, secondary)
    pub const fn tick_actions(self) -> (LineAction, LineAction) {
        match self {
            BlinkMode::Alternating | BlinkMode::Synchronized => {
                (LineAction::Toggle, LineAction::Toggle)
            }
            BlinkMode::OnlyPrimary => (LineAction::Toggle, LineAction::Hold),
            BlinkMode::OnlySecondary => (LineAction::Hold, LineAction::Toggle),
        }
    }

    /// Line levels that make this mode visible immediately
    ///
    /// Alternating and Synchronized share the same tick actions; they only
    /// differ here, in whether the lines start out of phase or in phase.
    pub const fn entry_polarity(self) -> Polarity {
        match self {
            BlinkMode::Alternating | BlinkMode::OnlyPrimary => Polarity {
                primary: true,
                secondary: false,
            },
            BlinkMode::OnlySecondary => Polarity {
                primary: false,
                secondary: true,
            },
            BlinkMode::Synchronized => Polarity {
                primary: true,
                secondary: true,
            },
        }
    }

    /// Operator-facing description
    pub const fn label(self) -> &'static str {
        match self {
            BlinkMode::Alternating => "both, alternating",
            BlinkMode::OnlyPrimary => "primary only",
            BlinkMode::OnlySecondary => "secondary only",
            BlinkMode::Synchronized => "both, synchronized",
        }
    }
}

impl core::fmt::Display for BlinkMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
