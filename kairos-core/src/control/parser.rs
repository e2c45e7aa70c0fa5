//! Command line parser
//!
//! Split on whitespace into a command word and at most 3 arguments.

/// Maximum number of arguments kept per command
pub const MAX_ARGS: usize = 3;

/// Parsed command with up to 3 arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The command name (first token), empty for a blank line
    pub command: &'a str,
    /// Up to 3 arguments
    pub args: [Option<&'a str>; MAX_ARGS],
    /// More tokens followed the last kept argument
    pub truncated: bool,
}

impl<'a> ParsedCommand<'a> {
    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }

    /// Number of arguments given, counting any beyond the kept three
    pub fn arg_count(&self) -> usize {
        let kept = self.args.iter().filter(|a| a.is_some()).count();
        kept + usize::from(self.truncated)
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

/// Parse a command line into command and arguments
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();

    let command = parts.next().unwrap_or("");

    let mut args = [None; MAX_ARGS];
    for (i, arg) in parts.by_ref().take(MAX_ARGS).enumerate() {
        args[i] = Some(arg);
    }
    let truncated = parts.next().is_some();

    ParsedCommand {
        command,
        args,
        truncated,
    }
}
