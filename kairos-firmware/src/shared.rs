//! State shared between the executors
//!
//! The scalar state lives in [`SHARED`] as atomics. The two LED lines are
//! written by both the button handler and the LED task, so they sit behind
//! a critical-section mutex; every lock is held for two pin writes at most.

use core::cell::RefCell;

use embassy_rp::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use kairos_core::blink::LinePair;
use kairos_core::state::SharedState;
use kairos_core::tasks::{task_table, TaskDescriptor, TASK_COUNT};
use kairos_drivers::LedLine;

use crate::config::CONTROLLER;

pub type Led = LedLine<Output<'static>>;

/// LED lines shared by the button and LED tasks
pub type SharedLines = Mutex<CriticalSectionRawMutex, RefCell<LinePair<Led, Led>>>;

/// Mode, periods, telemetry and task counters
pub static SHARED: SharedState = SharedState::from_config(&CONTROLLER);

/// Periodic task descriptions
pub static TASKS: [TaskDescriptor; TASK_COUNT] = task_table(&CONTROLLER.priorities);
