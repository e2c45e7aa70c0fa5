//! Periodic blink logic
//!
//! The hosting task calls [`BlinkController::start`] once, then
//! [`BlinkController::tick`] every blink period. The mode is polled with
//! an atomic load on each tick; the period is re-read before every sleep
//! so a change from the shell applies to the next interval.

use kairos_hal::OutputPin;

use super::lines::LinePair;
use crate::state::{BlinkMode, SharedState};
use crate::tasks::{TaskId, TaskStats};

/// Result of one blink tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Lines were updated for this mode
    Applied(BlinkMode),
    /// Task is suspended; lines left alone
    Suspended,
}

/// Drives the two blink lines from the shared mode
pub struct BlinkController<'a> {
    shared: &'a SharedState,
}

impl<'a> BlinkController<'a> {
    pub const fn new(shared: &'a SharedState) -> Self {
        Self { shared }
    }

    /// Put the lines out of phase
    ///
    /// Both lines are configured active at startup, so one toggle of the
    /// primary line gives the Alternating starting polarity.
    pub fn start<P: OutputPin, S: OutputPin>(&self, lines: &mut LinePair<P, S>) {
        lines.primary.toggle();
    }

    /// Run one tick
    pub fn tick<P: OutputPin, S: OutputPin>(&self, lines: &mut LinePair<P, S>) -> TickOutcome {
        if !self.stats().begin_cycle() {
            return TickOutcome::Suspended;
        }
        let mode = self.shared.mode.load();
        lines.apply(mode.tick_actions());
        TickOutcome::Applied(mode)
    }

    /// Record the busy time of a tick that did work
    pub fn finish(&self, busy_us: u64) {
        self.stats().end_cycle(busy_us);
    }

    /// Interval before the next tick (ms)
    pub fn period_ms(&self) -> u32 {
        self.shared.blink_period_ms()
    }

    fn stats(&self) -> &TaskStats {
        self.shared.stats(TaskId::Led)
    }
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroU32;

    use super::super::lines::mock::MockLine;
    use super::*;
    use crate::tasks::RunState;

    fn active_lines() -> LinePair<MockLine, MockLine> {
        LinePair::new(MockLine::high(), MockLine::high())
    }

    #[test]
    fn test_start_puts_lines_out_of_phase() {
        let shared = SharedState::new(1000, 1000);
        let controller = BlinkController::new(&shared);
        let mut lines = active_lines();

        controller.start(&mut lines);
        assert_ne!(lines.primary.high, lines.secondary.high);
    }

    #[test]
    fn test_alternating_stays_out_of_phase() {
        let shared = SharedState::new(1000, 1000);
        let controller = BlinkController::new(&shared);
        let mut lines = active_lines();
        controller.start(&mut lines);

        for _ in 0..5 {
            assert_eq!(
                controller.tick(&mut lines),
                TickOutcome::Applied(BlinkMode::Alternating)
            );
            assert_ne!(lines.primary.high, lines.secondary.high);
        }
    }

    #[test]
    fn test_only_primary_holds_secondary() {
        let shared = SharedState::new(1000, 1000);
        shared.mode.store(BlinkMode::OnlyPrimary);
        let controller = BlinkController::new(&shared);
        let mut lines = LinePair::new(MockLine::default(), MockLine::default());

        controller.tick(&mut lines);
        controller.tick(&mut lines);
        controller.tick(&mut lines);
        assert!(lines.primary.high);
        assert_eq!(lines.primary.writes, 3);
        assert_eq!(lines.secondary.writes, 0);
    }

    #[test]
    fn test_only_secondary_holds_primary() {
        let shared = SharedState::new(1000, 1000);
        shared.mode.store(BlinkMode::OnlySecondary);
        let controller = BlinkController::new(&shared);
        let mut lines = LinePair::new(MockLine::default(), MockLine::default());

        controller.tick(&mut lines);
        assert_eq!(lines.primary.writes, 0);
        assert!(lines.secondary.high);
    }

    #[test]
    fn test_suspended_tick_leaves_lines() {
        let shared = SharedState::new(1000, 1000);
        shared.stats(TaskId::Led).request_suspend();
        let controller = BlinkController::new(&shared);
        let mut lines = LinePair::new(MockLine::default(), MockLine::default());

        assert_eq!(controller.tick(&mut lines), TickOutcome::Suspended);
        assert_eq!(lines.primary.writes + lines.secondary.writes, 0);
        assert_eq!(shared.stats(TaskId::Led).state(), RunState::Suspended);
    }

    #[test]
    fn test_finish_counts_cycle() {
        let shared = SharedState::new(1000, 1000);
        let controller = BlinkController::new(&shared);
        let mut lines = active_lines();

        controller.tick(&mut lines);
        controller.finish(12);
        let snap = shared.stats(TaskId::Led).snapshot();
        assert_eq!(snap.cycles, 1);
        assert_eq!(snap.busy_us, 12);
        assert_eq!(snap.state, RunState::Sleeping);
    }

    #[test]
    fn test_period_change_is_seen() {
        let shared = SharedState::new(1000, 1000);
        let controller = BlinkController::new(&shared);
        shared.set_blink_period_ms(NonZeroU32::new(125).unwrap());
        assert_eq!(controller.period_ms(), 125);
    }
}
