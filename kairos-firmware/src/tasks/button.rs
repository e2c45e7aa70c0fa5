//! Mode button task
//!
//! Runs on the highest-priority interrupt executor. Each rising edge
//! advances the blink mode and forces the lines without waiting for the
//! LED task.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use kairos_core::blink::ModeSwitch;

use crate::shared::{SharedLines, SHARED};

#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>, lines: &'static SharedLines, debounce_ms: u32) {
    info!("Button task started");

    let mut switch = ModeSwitch::new(&SHARED.mode, debounce_ms);

    loop {
        button.wait_for_rising_edge().await;

        let now_ms = Instant::now().as_millis() as u32;
        let entered = lines.lock(|cell| switch.on_rising_edge(now_ms, &mut cell.borrow_mut()));

        match entered {
            Some(mode) => info!("LED mode: {}", mode),
            None => trace!("Button bounce ignored"),
        }
    }
}
