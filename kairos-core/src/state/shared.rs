//! Cross-context shared state
//!
//! Every field has one writer category and is accessed through a single
//! atomic load or store, so the edge handler, both periodic tasks and the
//! shell can touch it from any priority without locks.

use core::num::NonZeroU32;

use portable_atomic::{AtomicI32, AtomicU32, AtomicU8, Ordering};

use super::mode::BlinkMode;
use crate::config::ControllerConfig;
use crate::tasks::{TaskId, TaskStats};

/// Atomically stored [`BlinkMode`]
pub struct ModeCell(AtomicU8);

impl ModeCell {
    pub const fn new(mode: BlinkMode) -> Self {
        Self(AtomicU8::new(mode.bits()))
    }

    pub fn load(&self) -> BlinkMode {
        BlinkMode::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, mode: BlinkMode) {
        self.0.store(mode.bits(), Ordering::Release);
    }

    /// Move to the successor mode and return it
    ///
    /// A single read-modify-write, so two racing edges always produce two
    /// distinct steps.
    pub fn advance(&self) -> BlinkMode {
        let previous = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some(BlinkMode::from_bits(bits).successor().bits())
            })
            .unwrap_or_else(|bits| bits);
        BlinkMode::from_bits(previous).successor()
    }
}

impl Default for ModeCell {
    fn default() -> Self {
        Self::new(BlinkMode::default())
    }
}

/// Latest values published by the filter task
pub struct Telemetry {
    raw: AtomicI32,
    filtered: AtomicU32,
    millivolts: AtomicI32,
}

/// Copy of the telemetry fields
///
/// Each field is loaded on its own; the copy is not a consistent cut
/// across fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetrySnapshot {
    pub raw: i32,
    pub filtered: u32,
    pub millivolts: i32,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub const fn new() -> Self {
        Self {
            raw: AtomicI32::new(0),
            filtered: AtomicU32::new(0),
            millivolts: AtomicI32::new(0),
        }
    }

    pub fn publish_raw(&self, raw: i32) {
        self.raw.store(raw, Ordering::Relaxed);
    }

    pub fn publish_filtered(&self, filtered: u32) {
        self.filtered.store(filtered, Ordering::Relaxed);
    }

    pub fn publish_millivolts(&self, mv: i32) {
        self.millivolts.store(mv, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            raw: self.raw.load(Ordering::Relaxed),
            filtered: self.filtered.load(Ordering::Relaxed),
            millivolts: self.millivolts.load(Ordering::Relaxed),
        }
    }
}

/// State shared by the edge handler, the periodic tasks and the shell
pub struct SharedState {
    /// Advanced by the edge handler, read by the blink task
    pub mode: ModeCell,
    /// Written by the filter task, read by the shell
    pub telemetry: Telemetry,
    blink_period_ms: AtomicU32,
    sample_period_us: AtomicU32,
    led: TaskStats,
    filter: TaskStats,
    shell: TaskStats,
}

impl SharedState {
    /// Both periods must be non-zero; a zero is replaced by 1.
    pub const fn new(blink_period_ms: u32, sample_period_us: u32) -> Self {
        Self {
            mode: ModeCell::new(BlinkMode::Alternating),
            telemetry: Telemetry::new(),
            blink_period_ms: AtomicU32::new(non_zero_or_one(blink_period_ms)),
            sample_period_us: AtomicU32::new(non_zero_or_one(sample_period_us)),
            led: TaskStats::new(),
            filter: TaskStats::new(),
            shell: TaskStats::new(),
        }
    }

    /// Initial state from a validated configuration
    pub const fn from_config(config: &ControllerConfig) -> Self {
        Self::new(config.blink.period_ms, config.sampling.period_us)
    }

    pub fn blink_period_ms(&self) -> u32 {
        self.blink_period_ms.load(Ordering::Relaxed)
    }

    pub fn set_blink_period_ms(&self, period: NonZeroU32) {
        self.blink_period_ms.store(period.get(), Ordering::Relaxed);
    }

    pub fn sample_period_us(&self) -> u32 {
        self.sample_period_us.load(Ordering::Relaxed)
    }

    pub fn set_sample_period_us(&self, period: NonZeroU32) {
        self.sample_period_us.store(period.get(), Ordering::Relaxed);
    }

    /// Runtime counters of one task
    pub fn stats(&self, id: TaskId) -> &TaskStats {
        match id {
            TaskId::Led => &self.led,
            TaskId::Filter => &self.filter,
            TaskId::Shell => &self.shell,
        }
    }
}

const fn non_zero_or_one(value: u32) -> u32 {
    if value == 0 {
        1
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_cell_advance_wraps() {
        let cell = ModeCell::default();
        assert_eq!(cell.advance(), BlinkMode::OnlyPrimary);
        assert_eq!(cell.advance(), BlinkMode::OnlySecondary);
        assert_eq!(cell.advance(), BlinkMode::Synchronized);
        assert_eq!(cell.advance(), BlinkMode::Alternating);
        assert_eq!(cell.load(), BlinkMode::Alternating);
    }

    #[test]
    fn test_periods() {
        let state = SharedState::new(1000, 1000);
        assert_eq!(state.blink_period_ms(), 1000);

        state.set_blink_period_ms(NonZeroU32::new(250).unwrap());
        state.set_sample_period_us(NonZeroU32::new(20).unwrap());
        assert_eq!(state.blink_period_ms(), 250);
        assert_eq!(state.sample_period_us(), 20);
    }

    #[test]
    fn test_zero_initial_period_is_replaced() {
        let state = SharedState::new(0, 0);
        assert_eq!(state.blink_period_ms(), 1);
        assert_eq!(state.sample_period_us(), 1);
    }

    #[test]
    fn test_telemetry_fields_are_independent() {
        let telemetry = Telemetry::new();
        telemetry.publish_raw(-12);
        telemetry.publish_filtered(40);
        let snap = telemetry.snapshot();
        assert_eq!(snap.raw, -12);
        assert_eq!(snap.filtered, 40);
        assert_eq!(snap.millivolts, 0);
    }

    #[test]
    fn test_stats_are_per_task() {
        let state = SharedState::from_config(&ControllerConfig::new());
        state.stats(TaskId::Filter).request_suspend();
        assert!(state.stats(TaskId::Filter).is_suspend_requested());
        assert!(!state.stats(TaskId::Led).is_suspend_requested());
    }
}
