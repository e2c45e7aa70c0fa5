//! End-to-end command line tests

use kairos_core::config::PriorityConfig;
use kairos_core::control::{execute, write_help, CommandError, ControlPlane, SystemInfo};
use kairos_core::state::{BlinkMode, SharedState};
use kairos_core::tasks::{task_table, TaskDescriptor, TaskId, TASK_COUNT};

const SYSTEM: SystemInfo = SystemInfo {
    heap_bytes: 4096,
    stack_bytes: 8192,
};

fn clock() -> u64 {
    2_500_000
}

struct Fixture {
    shared: SharedState,
    tasks: [TaskDescriptor; TASK_COUNT],
}

impl Fixture {
    fn new() -> Self {
        Self {
            shared: SharedState::new(1000, 1000),
            tasks: task_table(&PriorityConfig::new()),
        }
    }

    fn plane(&self) -> ControlPlane<'_> {
        ControlPlane::new(&self.shared, &self.tasks, SYSTEM, clock)
    }

    fn run(&self, line: &str) -> (Result<(), CommandError>, String) {
        let mut out = String::new();
        let result = execute(&self.plane(), line, &mut out);
        (result, out)
    }
}

#[test]
fn test_blank_line_is_noop() {
    let fx = Fixture::new();
    let (result, out) = fx.run("   ");
    assert_eq!(result, Ok(()));
    assert!(out.is_empty());
}

#[test]
fn test_unknown_command() {
    let fx = Fixture::new();
    let (result, _) = fx.run("reboot now");
    assert_eq!(result, Err(CommandError::UnknownCommand));
    assert_eq!(result.unwrap_err().status(), -8);
}

#[test]
fn test_led_sets_period() {
    let fx = Fixture::new();
    let (result, out) = fx.run("led 250");
    assert_eq!(result, Ok(()));
    assert_eq!(out, "LED period set to: 250 ms\n");
    assert_eq!(fx.shared.blink_period_ms(), 250);
}

#[test]
fn test_led_usage() {
    let fx = Fixture::new();
    for line in ["led", "led 1 2"] {
        let (result, _) = fx.run(line);
        let err = result.unwrap_err();
        assert_eq!(err, CommandError::Usage("led <period_ms>"));
        assert_eq!(err.status(), -22);
        assert_eq!(err.to_string(), "usage: led <period_ms>");
    }
}

#[test]
fn test_led_rejects_bad_values() {
    let fx = Fixture::new();
    for line in ["led abc", "led -5", "led 99999999999", "led 0"] {
        let (result, _) = fx.run(line);
        assert_eq!(result.unwrap_err().status(), -22, "{}", line);
    }
    assert_eq!(fx.shared.blink_period_ms(), 1000);
}

#[test]
fn test_adc_dac() {
    let fx = Fixture::new();
    let (result, out) = fx.run("adc_dac 2000");
    assert_eq!(result, Ok(()));
    assert!(out.contains("2000 Hz"));
    assert_eq!(fx.shared.sample_period_us(), 500);

    let (result, _) = fx.run("adc_dac 200000");
    assert_eq!(result, Err(CommandError::OutOfRange));
    assert_eq!(fx.shared.sample_period_us(), 500);
}

#[test]
fn test_task_info_lists_all() {
    let fx = Fixture::new();
    let (result, out) = fx.run("task_info");
    assert_eq!(result, Ok(()));
    assert!(out.contains("led_task"));
    assert!(out.contains("filter_task"));
    assert!(out.contains("shell_task"));
    assert!(out.contains("pending"));
}

#[test]
fn test_task_info_shell() {
    let fx = Fixture::new();
    let (result, out) = fx.run("task_info shell_task");
    assert_eq!(result, Ok(()));
    assert!(out.contains("Kind: interactive"));
    assert!(out.contains("Priority: 4"));
    assert!(out.contains("Role: serial command shell"));
    assert!(out.contains("runs on command input"));
}

#[test]
fn test_shell_cannot_be_suspended() {
    let fx = Fixture::new();
    let (result, out) = fx.run("task_suspend shell_task");
    assert_eq!(result, Err(CommandError::NotSuspendable));
    assert_eq!(result.unwrap_err().status(), -22);
    assert!(out.is_empty());
    assert!(!fx.shared.stats(TaskId::Shell).is_suspend_requested());

    let (result, _) = fx.run("task_resume shell_task");
    assert_eq!(result, Err(CommandError::NotSuspendable));
}

#[test]
fn test_task_info_led_reports_mode_and_period() {
    let fx = Fixture::new();
    fx.shared.mode.store(BlinkMode::Synchronized);
    fx.run("led 300").0.unwrap();

    let (result, out) = fx.run("task_info led_task");
    assert_eq!(result, Ok(()));
    assert!(out.contains("Kind: soft real-time"));
    assert!(out.contains("Priority: 3"));
    assert!(out.contains("Period: 300 ms"));
    assert!(out.contains("LED mode: both, synchronized"));
}

#[test]
fn test_task_info_filter_reports_telemetry() {
    let fx = Fixture::new();
    fx.shared.telemetry.publish_raw(1024);
    fx.shared.telemetry.publish_millivolts(825);
    fx.shared.telemetry.publish_filtered(34);

    let (result, out) = fx.run("task_info filter_task");
    assert_eq!(result, Ok(()));
    assert!(out.contains("Kind: hard real-time"));
    assert!(out.contains("Last ADC: 1024 (825 mV)"));
    assert!(out.contains("Last DAC: 34"));
    assert!(out.contains("Sampling frequency: 1000 Hz"));
}

#[test]
fn test_task_info_not_found_lists_names() {
    let fx = Fixture::new();
    let (result, out) = fx.run("task_info nonexistent");
    assert_eq!(result, Err(CommandError::NotFound));
    assert_eq!(result.unwrap_err().status(), -2);
    assert_eq!(out, "Available tasks: led_task, filter_task, shell_task\n");
}

#[test]
fn test_suspend_and_resume() {
    let fx = Fixture::new();
    let (result, out) = fx.run("task_suspend led_task");
    assert_eq!(result, Ok(()));
    assert_eq!(out, "led_task suspended\n");
    assert!(fx.shared.stats(TaskId::Led).is_suspend_requested());

    fx.run("task_resume led_task").0.unwrap();
    assert!(!fx.shared.stats(TaskId::Led).is_suspend_requested());
}

#[test]
fn test_system() {
    let fx = Fixture::new();
    let (result, out) = fx.run("system");
    assert_eq!(result, Ok(()));
    assert!(out.contains("Heap: 4096 bytes"));
    assert!(out.contains("Main stack: 8192 bytes"));
    assert!(out.contains("Uptime: 2.500 s"));
    assert!(out.contains("filter_task"));
    assert!(out.contains("shell_task"));
}

#[test]
fn test_help_lists_commands_and_tasks() {
    let fx = Fixture::new();
    let mut out = String::new();
    write_help(&fx.plane(), &mut out).unwrap();
    for needle in [
        "led <period_ms>",
        "adc_dac <freq_hz>",
        "task_info [task_name]",
        "system",
        "help",
        "led_task",
        "filter_task",
        "hard real-time",
        "shell_task",
        "runs on command input",
    ] {
        assert!(out.contains(needle), "missing {}", needle);
    }

    let (result, via_command) = fx.run("help");
    assert_eq!(result, Ok(()));
    assert_eq!(via_command, out);
}

#[test]
fn test_reply_overflow_is_reported() {
    let fx = Fixture::new();
    let mut out: heapless::String<16> = heapless::String::new();
    let result = execute(&fx.plane(), "system", &mut out);
    assert_eq!(result, Err(CommandError::Output));
}
