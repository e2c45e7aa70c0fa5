//! LED blink pattern: periodic controller and mode button handling

pub mod controller;
pub mod lines;
pub mod switch;

pub use controller::{BlinkController, TickOutcome};
pub use lines::LinePair;
pub use switch::ModeSwitch;
