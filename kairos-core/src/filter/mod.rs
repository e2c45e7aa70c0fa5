//! Moving-average signal filter

pub mod pipeline;
pub mod window;

pub use pipeline::{SignalPipeline, StepOutcome};
pub use window::MovingAverage;
