//! Snapshots returned by the control plane and their text rendering

use core::fmt;

use heapless::Vec;

use crate::state::{BlinkMode, TelemetrySnapshot};
use crate::tasks::{RunState, StatsSnapshot, TaskDescriptor, TASK_COUNT};

/// One row of a task listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLine {
    pub descriptor: TaskDescriptor,
    pub state: RunState,
}

/// Fields common to every task detail report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCommon {
    pub descriptor: TaskDescriptor,
    pub stats: StatsSnapshot,
    pub load_permille: u32,
}

/// Detail report of one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskDetail {
    Led {
        common: TaskCommon,
        period_ms: u32,
        mode: BlinkMode,
    },
    Filter {
        common: TaskCommon,
        telemetry: TelemetrySnapshot,
        period_us: u32,
        rate_hz: u32,
    },
    Shell {
        common: TaskCommon,
    },
}

impl TaskDetail {
    pub fn common(&self) -> &TaskCommon {
        match self {
            TaskDetail::Led { common, .. }
            | TaskDetail::Filter { common, .. }
            | TaskDetail::Shell { common } => common,
        }
    }
}

/// Answer to `task_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskReport {
    /// No name given: every task with its state
    All(Vec<TaskLine, TASK_COUNT>),
    /// One named task
    Detail(TaskDetail),
}

/// Answer to `system`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemReport {
    pub tasks: Vec<TaskLine, TASK_COUNT>,
    pub heap_bytes: u32,
    pub stack_bytes: u32,
    pub uptime_us: u64,
}

struct Permille(u32);

impl fmt::Display for Permille {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}%", self.0 / 10, self.0 % 10)
    }
}

fn write_task_table(f: &mut fmt::Formatter<'_>, tasks: &[TaskLine]) -> fmt::Result {
    writeln!(f, "{:<15} | {:<9} | {:<14} | Priority", "Name", "State", "Kind")?;
    writeln!(f, "----------------|-----------|----------------|---------")?;
    for line in tasks {
        writeln!(
            f,
            "{:<15} | {:<9} | {:<14} | {}",
            line.descriptor.name,
            line.state.label(),
            line.descriptor.kind.label(),
            line.descriptor.priority
        )?;
    }
    Ok(())
}

impl fmt::Display for TaskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskReport::All(tasks) => {
                writeln!(f, "All tasks:")?;
                write_task_table(f, tasks)
            }
            TaskReport::Detail(detail) => write!(f, "{}", detail),
        }
    }
}

impl fmt::Display for TaskDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let common = self.common();
        let d = &common.descriptor;
        writeln!(f, "=== Task: {} ===", d.name)?;
        writeln!(f, "Kind: {}", d.kind.label())?;
        writeln!(f, "Priority: {}", d.priority)?;
        writeln!(f, "State: {}", common.stats.state)?;
        writeln!(f, "Cycles: {}", common.stats.cycles)?;
        writeln!(
            f,
            "Busy: {} us (load {})",
            common.stats.busy_us,
            Permille(common.load_permille)
        )?;

        match self {
            TaskDetail::Led {
                period_ms, mode, ..
            } => {
                writeln!(f, "Period: {} ms", period_ms)?;
                writeln!(f, "LED mode: {}", mode)?;
            }
            TaskDetail::Filter {
                telemetry,
                period_us,
                rate_hz,
                ..
            } => {
                writeln!(f, "Role: {}", d.role)?;
                writeln!(
                    f,
                    "Last ADC: {} ({} mV)",
                    telemetry.raw, telemetry.millivolts
                )?;
                writeln!(f, "Last DAC: {}", telemetry.filtered)?;
                writeln!(f, "Sampling frequency: {} Hz ({} us)", rate_hz, period_us)?;
            }
            TaskDetail::Shell { .. } => {
                writeln!(f, "Role: {}", d.role)?;
                writeln!(f, "Period: none, runs on command input")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SystemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== System ===")?;
        writeln!(f, "Installed tasks:")?;
        write_task_table(f, &self.tasks)?;
        writeln!(f)?;
        writeln!(
            f,
            "Uptime: {}.{:03} s",
            self.uptime_us / 1_000_000,
            (self.uptime_us / 1000) % 1000
        )?;
        writeln!(f, "Heap: {} bytes", self.heap_bytes)?;
        writeln!(
            f,
            "Main stack: {} bytes (shared by all executors)",
            self.stack_bytes
        )?;
        writeln!(f)?;
        writeln!(f, "For details on one task:")?;
        writeln!(f, "  task_info <task_name>")
    }
}
