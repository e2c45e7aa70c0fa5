//! Task descriptions and runtime counters

pub mod descriptor;
pub mod stats;

pub use descriptor::{
    find_task, task_table, PeriodSource, TaskDescriptor, TaskId, TaskKind, FILTER_TASK_NAME,
    LED_TASK_NAME, SHELL_TASK_NAME, TASK_COUNT, THREAD_MODE_PRIORITY,
};
pub use stats::{RunState, StatsSnapshot, TaskStats};
