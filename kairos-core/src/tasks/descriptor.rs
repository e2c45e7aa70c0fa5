//! Static task descriptions
//!
//! Created once at startup from the priority configuration and never
//! modified; the control plane uses them for lookup and reporting.

use crate::config::{PriorityConfig, PRIORITY_LEVELS};

/// Name of the soft real-time blink task
pub const LED_TASK_NAME: &str = "led_task";

/// Name of the hard real-time filter task
pub const FILTER_TASK_NAME: &str = "filter_task";

/// Name of the command shell task
pub const SHELL_TASK_NAME: &str = "shell_task";

/// Number of tasks, the shell included
pub const TASK_COUNT: usize = 3;

/// Reported priority of thread-mode code, below every interrupt level
pub const THREAD_MODE_PRIORITY: u8 = PRIORITY_LEVELS;

/// Which task a descriptor refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskId {
    Led,
    Filter,
    Shell,
}

/// Deadline class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskKind {
    /// A missed deadline degrades quality
    SoftRealTime,
    /// A missed deadline is a correctness failure
    HardRealTime,
    /// No deadline; runs when a command line arrives
    Interactive,
}

impl TaskKind {
    pub const fn label(self) -> &'static str {
        match self {
            TaskKind::SoftRealTime => "soft real-time",
            TaskKind::HardRealTime => "hard real-time",
            TaskKind::Interactive => "interactive",
        }
    }
}

/// Shared value that sets a task's cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeriodSource {
    /// Blink period, milliseconds
    BlinkPeriod,
    /// Sample period, microseconds
    SamplePeriod,
}

impl PeriodSource {
    /// Shell command that changes this period
    pub const fn command(self) -> &'static str {
        match self {
            PeriodSource::BlinkPeriod => "led",
            PeriodSource::SamplePeriod => "adc_dac",
        }
    }
}

/// Immutable description of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskDescriptor {
    pub id: TaskId,
    pub name: &'static str,
    /// Lower numbers preempt higher ones
    pub priority: u8,
    /// `None` for a task without a period
    pub period: Option<PeriodSource>,
    pub kind: TaskKind,
    /// One-line description of what the task does
    pub role: &'static str,
}

impl TaskDescriptor {
    pub const fn led(priority: u8) -> Self {
        Self {
            id: TaskId::Led,
            name: LED_TASK_NAME,
            priority,
            period: Some(PeriodSource::BlinkPeriod),
            kind: TaskKind::SoftRealTime,
            role: "LED blink pattern",
        }
    }

    pub const fn filter(priority: u8) -> Self {
        Self {
            id: TaskId::Filter,
            name: FILTER_TASK_NAME,
            priority,
            period: Some(PeriodSource::SamplePeriod),
            kind: TaskKind::HardRealTime,
            role: "moving-average filter ADC->DAC",
        }
    }

    pub const fn shell() -> Self {
        Self {
            id: TaskId::Shell,
            name: SHELL_TASK_NAME,
            priority: THREAD_MODE_PRIORITY,
            period: None,
            kind: TaskKind::Interactive,
            role: "serial command shell",
        }
    }

    /// Only tasks with a period can be suspended
    pub const fn is_periodic(&self) -> bool {
        self.period.is_some()
    }
}

/// Build the task table in reporting order
pub const fn task_table(priorities: &PriorityConfig) -> [TaskDescriptor; TASK_COUNT] {
    [
        TaskDescriptor::led(priorities.led),
        TaskDescriptor::filter(priorities.filter),
        TaskDescriptor::shell(),
    ]
}

/// Look up a task by its exact name
pub fn find_task<'a>(tasks: &'a [TaskDescriptor], name: &str) -> Option<&'a TaskDescriptor> {
    tasks.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_table() {
        let tasks = task_table(&PriorityConfig::new());
        assert_eq!(tasks[0].name, "led_task");
        assert_eq!(tasks[0].kind, TaskKind::SoftRealTime);
        assert_eq!(tasks[1].name, "filter_task");
        assert_eq!(tasks[1].kind, TaskKind::HardRealTime);
        // Hard real-time task preempts the soft one
        assert!(tasks[1].priority < tasks[0].priority);
        assert_eq!(tasks[0].period.map(PeriodSource::command), Some("led"));
        assert_eq!(tasks[1].period.map(PeriodSource::command), Some("adc_dac"));
    }

    #[test]
    fn test_shell_entry() {
        let priorities = PriorityConfig::new();
        let tasks = task_table(&priorities);
        let shell = find_task(&tasks, "shell_task").unwrap();
        assert_eq!(shell.id, TaskId::Shell);
        assert_eq!(shell.kind, TaskKind::Interactive);
        assert!(!shell.is_periodic());
        assert!(tasks[0].is_periodic() && tasks[1].is_periodic());
        // Preempted by everything else
        assert!(shell.priority > priorities.led);
    }

    #[test]
    fn test_find_task() {
        let tasks = task_table(&PriorityConfig::new());
        assert_eq!(find_task(&tasks, "filter_task").map(|t| t.id), Some(TaskId::Filter));
        assert!(find_task(&tasks, "nonexistent").is_none());
        assert!(find_task(&tasks, "LED_TASK").is_none());
    }
}
