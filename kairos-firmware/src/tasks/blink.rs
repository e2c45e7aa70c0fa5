//! LED blink task (soft real-time)
//!
//! Polls the blink mode once per period and toggles the lines to match.

use defmt::*;
use embassy_time::{Instant, Timer};

use kairos_core::blink::{BlinkController, TickOutcome};

use crate::shared::{SharedLines, SHARED};

#[embassy_executor::task]
pub async fn led_task(lines: &'static SharedLines) {
    info!("LED task started");

    let controller = BlinkController::new(&SHARED);
    lines.lock(|cell| controller.start(&mut cell.borrow_mut()));

    loop {
        let started = Instant::now();
        let outcome = lines.lock(|cell| controller.tick(&mut cell.borrow_mut()));

        if let TickOutcome::Applied(mode) = outcome {
            trace!("LED tick: {}", mode);
            controller.finish(started.elapsed().as_micros());
        }

        // Re-read each period so `led <ms>` applies to the next interval
        Timer::after_millis(controller.period_ms() as u64).await;
    }
}
