//! ADC to DAC filter task (hard real-time)
//!
//! Samples on a fixed cadence derived from the shared sample period. A
//! missed deadline resynchronises to the current time instead of bursting
//! to catch up.

use defmt::*;
use embassy_time::{Duration, Instant, Timer};

use kairos_core::filter::SignalPipeline;
use kairos_core::tasks::TaskId;
use kairos_drivers::AdcCalibration;
use kairos_hal_rp2040::{PwmOutput, RpAdcBank};

use crate::shared::SHARED;

/// Input channels sampled each period
pub type InputBank = RpAdcBank<'static, 1>;

#[embassy_executor::task]
pub async fn filter_task(inputs: InputBank, output: PwmOutput<'static>, calibration: AdcCalibration) {
    info!("Filter task started");

    let mut pipeline = match SignalPipeline::configure(inputs, output, calibration, &SHARED) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("Filter channel setup failed: {}", e);
            SHARED.stats(TaskId::Filter).halt();
            return;
        }
    };
    info!("Filter channels configured");

    let mut deadline = Instant::now();

    loop {
        let started = Instant::now();
        let outcome = pipeline.step();

        if !outcome.suspended {
            for (channel, e) in outcome.skipped.iter() {
                warn!("ADC{} read failed: {}", channel, e);
            }
            if let Some(e) = outcome.write_error {
                warn!("Output write failed: {}", e);
            }
            if let Some(e) = outcome.conversion_error {
                debug!("Millivolt conversion failed: {}", e);
            }
            pipeline.finish(started.elapsed().as_micros());
        }

        deadline += Duration::from_micros(pipeline.sample_period_us() as u64);
        let now = Instant::now();
        if deadline < now {
            trace!("Filter deadline missed by {} us", (now - deadline).as_micros());
            deadline = now;
        }
        Timer::at(deadline).await;
    }
}
