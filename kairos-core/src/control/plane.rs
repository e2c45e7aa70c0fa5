//! Synchronous command operations over the shared state
//!
//! Each operation validates its input, performs at most one mutation and
//! returns a value or a [`CommandError`]. Reads go field by field through
//! atomic loads and never wait on the periodic tasks.

use core::num::NonZeroU32;

use heapless::Vec;

use super::error::CommandError;
use super::number::parse_decimal;
use super::report::{SystemReport, TaskCommon, TaskDetail, TaskLine, TaskReport};
use crate::config::{MAX_SAMPLE_RATE_HZ, MICROS_PER_SECOND, MIN_SAMPLE_RATE_HZ};
use crate::state::SharedState;
use crate::tasks::{find_task, TaskDescriptor, TaskId, TASK_COUNT};

/// Static resource totals reported by `system`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemInfo {
    pub heap_bytes: u32,
    pub stack_bytes: u32,
}

/// Accepted sample rate and the period it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRate {
    pub hz: u32,
    pub period_us: u32,
}

/// Command surface over the shared runtime state
pub struct ControlPlane<'a> {
    shared: &'a SharedState,
    tasks: &'a [TaskDescriptor],
    system: SystemInfo,
    /// Microseconds since boot
    clock: fn() -> u64,
}

impl<'a> ControlPlane<'a> {
    pub const fn new(
        shared: &'a SharedState,
        tasks: &'a [TaskDescriptor],
        system: SystemInfo,
        clock: fn() -> u64,
    ) -> Self {
        Self {
            shared,
            tasks,
            system,
            clock,
        }
    }

    pub fn tasks(&self) -> &'a [TaskDescriptor] {
        self.tasks
    }

    /// Set the blink period from a decimal millisecond value
    pub fn set_blink_period(&self, text: &str) -> Result<u32, CommandError> {
        let ms = parse_decimal(text)?;
        let period = NonZeroU32::new(ms).ok_or(CommandError::OutOfRange)?;
        self.shared.set_blink_period_ms(period);
        Ok(ms)
    }

    /// Set the sample period from a decimal frequency in Hz
    pub fn set_sample_rate(&self, text: &str) -> Result<SampleRate, CommandError> {
        let hz = parse_decimal(text)?;
        if !(MIN_SAMPLE_RATE_HZ..=MAX_SAMPLE_RATE_HZ).contains(&hz) {
            return Err(CommandError::OutOfRange);
        }
        let period_us = MICROS_PER_SECOND / hz;
        let period = NonZeroU32::new(period_us).ok_or(CommandError::OutOfRange)?;
        self.shared.set_sample_period_us(period);
        Ok(SampleRate { hz, period_us })
    }

    /// Every task with its state, or the detail of one named task
    pub fn task_info(&self, name: Option<&str>) -> Result<TaskReport, CommandError> {
        match name {
            None => Ok(TaskReport::All(self.task_lines())),
            Some(name) => {
                let descriptor = self.lookup(name)?;
                Ok(TaskReport::Detail(self.detail(descriptor)))
            }
        }
    }

    /// Task states and static resource totals
    pub fn system_info(&self) -> SystemReport {
        SystemReport {
            tasks: self.task_lines(),
            heap_bytes: self.system.heap_bytes,
            stack_bytes: self.system.stack_bytes,
            uptime_us: (self.clock)(),
        }
    }

    /// Pause a periodic task from its next cycle on
    pub fn suspend(&self, name: &str) -> Result<&'a TaskDescriptor, CommandError> {
        let descriptor = self.lookup_periodic(name)?;
        self.shared.stats(descriptor.id).request_suspend();
        Ok(descriptor)
    }

    /// Undo [`ControlPlane::suspend`]
    pub fn resume(&self, name: &str) -> Result<&'a TaskDescriptor, CommandError> {
        let descriptor = self.lookup_periodic(name)?;
        self.shared.stats(descriptor.id).request_resume();
        Ok(descriptor)
    }

    fn lookup(&self, name: &str) -> Result<&'a TaskDescriptor, CommandError> {
        find_task(self.tasks, name).ok_or(CommandError::NotFound)
    }

    fn lookup_periodic(&self, name: &str) -> Result<&'a TaskDescriptor, CommandError> {
        let descriptor = self.lookup(name)?;
        if descriptor.is_periodic() {
            Ok(descriptor)
        } else {
            Err(CommandError::NotSuspendable)
        }
    }

    fn task_lines(&self) -> Vec<TaskLine, TASK_COUNT> {
        self.tasks
            .iter()
            .take(TASK_COUNT)
            .map(|descriptor| TaskLine {
                descriptor: *descriptor,
                state: self.shared.stats(descriptor.id).state(),
            })
            .collect()
    }

    fn detail(&self, descriptor: &TaskDescriptor) -> TaskDetail {
        let stats = self.shared.stats(descriptor.id).snapshot();
        let common = TaskCommon {
            descriptor: *descriptor,
            stats,
            load_permille: stats.load_permille((self.clock)()),
        };

        match descriptor.id {
            TaskId::Led => TaskDetail::Led {
                common,
                period_ms: self.shared.blink_period_ms(),
                mode: self.shared.mode.load(),
            },
            TaskId::Filter => {
                let period_us = self.shared.sample_period_us();
                TaskDetail::Filter {
                    common,
                    telemetry: self.shared.telemetry.snapshot(),
                    period_us,
                    rate_hz: MICROS_PER_SECOND / period_us.max(1),
                }
            }
            TaskId::Shell => TaskDetail::Shell { common },
        }
    }
}
