//! Command table and dispatch

use core::fmt::Write;

use super::error::CommandError;
use super::parser::{parse_line, ParsedCommand};
use super::plane::ControlPlane;

type Handler =
    fn(&ControlPlane<'_>, &ParsedCommand<'_>, &mut dyn Write) -> Result<(), CommandError>;

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    /// Full syntax, shown by `help` and in usage errors
    pub usage: &'static str,
    pub brief: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    pub handler: Handler,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "led",
        usage: "led <period_ms>",
        brief: "Set the LED blink period in ms",
        min_args: 1,
        max_args: 1,
        handler: cmd_led,
    },
    CommandDescriptor {
        name: "adc_dac",
        usage: "adc_dac <freq_hz>",
        brief: "Set the ADC->DAC sampling frequency (1..100000 Hz)",
        min_args: 1,
        max_args: 1,
        handler: cmd_adc_dac,
    },
    CommandDescriptor {
        name: "task_info",
        usage: "task_info [task_name]",
        brief: "Show one task in detail, or list all tasks",
        min_args: 0,
        max_args: 1,
        handler: cmd_task_info,
    },
    CommandDescriptor {
        name: "task_suspend",
        usage: "task_suspend <task_name>",
        brief: "Pause a periodic task",
        min_args: 1,
        max_args: 1,
        handler: cmd_task_suspend,
    },
    CommandDescriptor {
        name: "task_resume",
        usage: "task_resume <task_name>",
        brief: "Resume a paused task",
        min_args: 1,
        max_args: 1,
        handler: cmd_task_resume,
    },
    CommandDescriptor {
        name: "system",
        usage: "system",
        brief: "Show tasks and system resources",
        min_args: 0,
        max_args: 0,
        handler: cmd_system,
    },
    CommandDescriptor {
        name: "help",
        usage: "help",
        brief: "Show this help",
        min_args: 0,
        max_args: 0,
        handler: cmd_help,
    },
];

/// Parse and execute one command line
///
/// A blank line is a no-op.
pub fn execute(
    plane: &ControlPlane<'_>,
    line: &str,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let cmd = parse_line(line);
    if cmd.is_empty() {
        return Ok(());
    }

    let descriptor = find_command(cmd.command).ok_or(CommandError::UnknownCommand)?;

    let argc = cmd.arg_count();
    if argc < descriptor.min_args || argc > descriptor.max_args {
        return Err(CommandError::Usage(descriptor.usage));
    }

    (descriptor.handler)(plane, &cmd, out)
}

pub fn find_command(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Write the command list and the task summary
pub fn write_help(plane: &ControlPlane<'_>, out: &mut dyn Write) -> Result<(), CommandError> {
    writeln!(out, "=== Available commands ===")?;
    writeln!(out)?;
    for c in COMMANDS {
        writeln!(out, "  {:<26} {}", c.usage, c.brief)?;
    }
    writeln!(out)?;
    writeln!(out, "=== Tasks ===")?;
    for task in plane.tasks() {
        write!(
            out,
            "  {:<12} {:<14} (priority {}, ",
            task.name,
            task.kind.label(),
            task.priority
        )?;
        match task.period {
            Some(period) => writeln!(out, "period set by '{}')", period.command())?,
            None => writeln!(out, "runs on command input)")?,
        }
    }
    writeln!(out)?;
    writeln!(out, "Press the board button to change the LED mode")?;
    Ok(())
}

fn write_task_names(plane: &ControlPlane<'_>, out: &mut dyn Write) -> Result<(), CommandError> {
    write!(out, "Available tasks:")?;
    for (i, task) in plane.tasks().iter().enumerate() {
        let sep = if i == 0 { " " } else { ", " };
        write!(out, "{}{}", sep, task.name)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Run a name lookup and list the valid names when it fails
fn with_task_name<T>(
    plane: &ControlPlane<'_>,
    out: &mut dyn Write,
    result: Result<T, CommandError>,
) -> Result<T, CommandError> {
    if result.as_ref().err() == Some(&CommandError::NotFound) {
        write_task_names(plane, out)?;
    }
    result
}

// Argument counts are checked by `execute` before a handler runs.

fn cmd_led(
    plane: &ControlPlane<'_>,
    cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let ms = plane.set_blink_period(cmd.arg(0).unwrap_or(""))?;
    writeln!(out, "LED period set to: {} ms", ms)?;
    Ok(())
}

fn cmd_adc_dac(
    plane: &ControlPlane<'_>,
    cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let rate = plane.set_sample_rate(cmd.arg(0).unwrap_or(""))?;
    writeln!(
        out,
        "Sampling frequency set to: {} Hz (period {} us)",
        rate.hz, rate.period_us
    )?;
    Ok(())
}

fn cmd_task_info(
    plane: &ControlPlane<'_>,
    cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let report = with_task_name(plane, out, plane.task_info(cmd.arg(0)))?;
    write!(out, "{}", report)?;
    Ok(())
}

fn cmd_task_suspend(
    plane: &ControlPlane<'_>,
    cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let task = with_task_name(plane, out, plane.suspend(cmd.arg(0).unwrap_or("")))?;
    writeln!(out, "{} suspended", task.name)?;
    Ok(())
}

fn cmd_task_resume(
    plane: &ControlPlane<'_>,
    cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let task = with_task_name(plane, out, plane.resume(cmd.arg(0).unwrap_or("")))?;
    writeln!(out, "{} resumed", task.name)?;
    Ok(())
}

fn cmd_system(
    plane: &ControlPlane<'_>,
    _cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    write!(out, "{}", plane.system_info())?;
    Ok(())
}

fn cmd_help(
    plane: &ControlPlane<'_>,
    _cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    write_help(plane, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_is_unique() {
        for (i, a) in COMMANDS.iter().enumerate() {
            for b in &COMMANDS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_usage_starts_with_name() {
        for c in COMMANDS {
            assert!(c.usage.starts_with(c.name));
            assert!(c.min_args <= c.max_args);
        }
    }

    #[test]
    fn test_find_command() {
        assert!(find_command("adc_dac").is_some());
        assert!(find_command("reboot").is_none());
    }
}
