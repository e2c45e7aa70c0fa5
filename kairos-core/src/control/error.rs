//! Command error types

/// Invalid argument (errno `EINVAL`)
pub const EINVAL: i32 = -22;
/// No such entity (errno `ENOENT`)
pub const ENOENT: i32 = -2;
/// Exec format error, used for unknown commands (errno `ENOEXEC`)
pub const ENOEXEC: i32 = -8;
/// I/O error, used when the reply could not be written (errno `EIO`)
pub const EIO: i32 = -5;

/// Command failure
///
/// No state is mutated when a command returns one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Wrong number of arguments; carries the command syntax
    Usage(&'static str),
    /// Argument is empty, too long, signed or not a decimal number
    InvalidValue,
    /// Argument parsed but lies outside the accepted range
    OutOfRange,
    /// No task with that name
    NotFound,
    /// Task has no period to pause
    NotSuspendable,
    /// No command with that name
    UnknownCommand,
    /// Reply buffer overflowed
    Output,
}

impl CommandError {
    /// Errno-style status code, always negative
    pub const fn status(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::InvalidValue | Self::OutOfRange | Self::NotSuspendable => {
                EINVAL
            }
            Self::NotFound => ENOENT,
            Self::UnknownCommand => ENOEXEC,
            Self::Output => EIO,
        }
    }

    /// Short description
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Usage(_) => "wrong number of arguments",
            Self::InvalidValue => "invalid value",
            Self::OutOfRange => "value out of range",
            Self::NotFound => "task not found",
            Self::NotSuspendable => "task cannot be suspended",
            Self::UnknownCommand => "unknown command",
            Self::Output => "reply too long",
        }
    }
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Usage(syntax) => write!(f, "usage: {}", syntax),
            _ => f.write_str(self.message()),
        }
    }
}

impl From<core::fmt::Error> for CommandError {
    fn from(_: core::fmt::Error) -> Self {
        Self::Output
    }
}
