//! Mode button edge handling
//!
//! Runs at the highest priority. Each accepted rising edge advances the
//! shared mode and immediately drives the lines to the polarity the new
//! mode expects; the blink task re-applies its pattern on its next tick.
//! Work per edge is one atomic read-modify-write and two line writes.

use kairos_hal::OutputPin;

use super::lines::LinePair;
use crate::state::{BlinkMode, ModeCell};

/// Advances the blink mode on button edges
pub struct ModeSwitch<'a> {
    mode: &'a ModeCell,
    debounce_ms: u32,
    last_edge_ms: Option<u32>,
}

impl<'a> ModeSwitch<'a> {
    /// `debounce_ms` of 0 accepts every edge
    pub const fn new(mode: &'a ModeCell, debounce_ms: u32) -> Self {
        Self {
            mode,
            debounce_ms,
            last_edge_ms: None,
        }
    }

    /// Handle a rising edge seen at `now_ms`
    ///
    /// Returns the mode entered, or `None` if the edge fell inside the
    /// debounce interval and was ignored.
    pub fn on_rising_edge<P: OutputPin, S: OutputPin>(
        &mut self,
        now_ms: u32,
        lines: &mut LinePair<P, S>,
    ) -> Option<BlinkMode> {
        if self.is_bounce(now_ms) {
            return None;
        }
        self.last_edge_ms = Some(now_ms);

        let next = self.mode.advance();
        lines.force(next.entry_polarity());
        Some(next)
    }

    fn is_bounce(&self, now_ms: u32) -> bool {
        match self.last_edge_ms {
            Some(last) if self.debounce_ms > 0 => now_ms.wrapping_sub(last) < self.debounce_ms,
            _ => false,
        }
    }
}
