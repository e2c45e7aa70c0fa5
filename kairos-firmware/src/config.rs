//! Build-time controller configuration
//!
//! `build.rs` validates controller.toml and generates `CONTROLLER`.

use kairos_core::config::{
    BlinkConfig, ControllerConfig, PriorityConfig, SamplingConfig, SystemConfig,
};

include!(concat!(env!("OUT_DIR"), "/controller_config.rs"));
