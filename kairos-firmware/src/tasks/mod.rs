//! Embassy tasks
//!
//! Each task runs on its own executor and shares state only through
//! `crate::shared`.

pub mod blink;
pub mod button;
pub mod filter;
pub mod shell;

pub use blink::led_task;
pub use button::button_task;
pub use filter::{filter_task, InputBank};
pub use shell::shell_task;
