//! Operator command surface
//!
//! [`ControlPlane`] holds the operations; [`commands`] maps text lines onto
//! them and renders the replies.

pub mod commands;
pub mod error;
pub mod line;
pub mod number;
pub mod parser;
pub mod plane;
pub mod report;

pub use commands::{execute, write_help, CommandDescriptor, COMMANDS};
pub use error::CommandError;
pub use line::{Edit, LineBuffer, LINE_SIZE};
pub use number::parse_decimal;
pub use parser::{parse_line, ParsedCommand};
pub use plane::{ControlPlane, SampleRate, SystemInfo};
pub use report::{SystemReport, TaskDetail, TaskLine, TaskReport};
