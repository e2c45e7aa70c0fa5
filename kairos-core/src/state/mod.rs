//! Blink mode and the state shared between execution contexts

pub mod mode;
pub mod shared;

pub use mode::{BlinkMode, LineAction, Polarity};
pub use shared::{ModeCell, SharedState, Telemetry, TelemetrySnapshot};
