//! Per-task runtime bookkeeping
//!
//! Each periodic task owns one [`TaskStats`]: it is the only writer of the
//! run-state and counters, while the control plane reads them and sets the
//! suspend request. All fields are independent atomics, so a reader never
//! waits on a task and a task never waits on a reader.

use portable_atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};

/// Observable task state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RunState {
    /// Task not started yet
    Pending = 0,
    /// Executing a cycle
    Running = 1,
    /// Waiting for its next period
    Sleeping = 2,
    /// Administratively paused; keeps its cadence but does no work
    Suspended = 3,
    /// Stopped after a fatal startup error
    Halted = 4,
}

impl RunState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => RunState::Running,
            2 => RunState::Sleeping,
            3 => RunState::Suspended,
            4 => RunState::Halted,
            _ => RunState::Pending,
        }
    }

    /// Operator-facing name
    pub const fn label(self) -> &'static str {
        match self {
            RunState::Pending => "pending",
            RunState::Running => "running",
            RunState::Sleeping => "sleeping",
            RunState::Suspended => "suspended",
            RunState::Halted => "halted",
        }
    }
}

impl core::fmt::Display for RunState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Point-in-time copy of a task's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatsSnapshot {
    pub state: RunState,
    pub cycles: u64,
    pub busy_us: u64,
}

impl StatsSnapshot {
    /// Share of `uptime_us` spent executing, in tenths of a percent
    pub fn load_permille(&self, uptime_us: u64) -> u32 {
        if uptime_us == 0 {
            return 0;
        }
        let permille = self.busy_us.saturating_mul(1000) / uptime_us;
        permille.min(1000) as u32
    }
}

/// Runtime counters for one periodic task
pub struct TaskStats {
    state: AtomicU8,
    suspend_requested: AtomicBool,
    /// 64-bit so a 10 kHz task does not wrap after five days
    cycles: AtomicU64,
    busy_us: AtomicU64,
}

impl Default for TaskStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStats {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(RunState::Pending as u8),
            suspend_requested: AtomicBool::new(false),
            cycles: AtomicU64::new(0),
            busy_us: AtomicU64::new(0),
        }
    }

    /// Mark the start of a cycle
    ///
    /// Returns `false` when the task is suspended and must skip its work
    /// for this period.
    pub fn begin_cycle(&self) -> bool {
        if self.suspend_requested.load(Ordering::Acquire) {
            self.set_state(RunState::Suspended);
            false
        } else {
            self.set_state(RunState::Running);
            true
        }
    }

    /// Mark the end of a cycle that did work for `busy_us` microseconds
    pub fn end_cycle(&self, busy_us: u64) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
        self.busy_us.fetch_add(busy_us, Ordering::Relaxed);
        self.set_state(RunState::Sleeping);
    }

    /// Record a fatal startup error
    pub fn halt(&self) {
        self.set_state(RunState::Halted);
    }

    /// Ask the task to stop doing work from its next cycle on
    pub fn request_suspend(&self) {
        self.suspend_requested.store(true, Ordering::Release);
    }

    /// Let a suspended task resume from its next cycle on
    pub fn request_resume(&self) {
        self.suspend_requested.store(false, Ordering::Release);
    }

    pub fn is_suspend_requested(&self) -> bool {
        self.suspend_requested.load(Ordering::Acquire)
    }

    pub fn state(&self) -> RunState {
        RunState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            state: self.state(),
            cycles: self.cycles.load(Ordering::Relaxed),
            busy_us: self.busy_us.load(Ordering::Relaxed),
        }
    }

    fn set_state(&self, state: RunState) {
        self.state.store(state as u8, Ordering::Release);
    }
}
