//! ADC to DAC filter pipeline
//!
//! One step per sample period: read every input channel, push each reading
//! into the moving-average window, write the clamped mean to the output
//! channel and publish raw, filtered and millivolt values for the shell.
//! A failed read skips that channel for the period; nothing here is fatal
//! once [`SignalPipeline::configure`] has succeeded.

use heapless::Vec;
use kairos_hal::{bring_up, AnalogInputs, AnalogOutput, ChannelError, SetupError};

use super::window::MovingAverage;
use crate::config::{FILTER_WINDOW_LEN, MAX_INPUT_CHANNELS};
use crate::state::SharedState;
use crate::tasks::{TaskId, TaskStats};
use crate::traits::{ConversionError, SampleConverter};

/// What happened during one step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepOutcome {
    /// Channels read successfully
    pub sampled: u8,
    /// Channels skipped this period, by channel id
    pub skipped: Vec<(u8, ChannelError), MAX_INPUT_CHANNELS>,
    /// Last output write failure, if any
    pub write_error: Option<ChannelError>,
    /// Last millivolt conversion failure, if any
    pub conversion_error: Option<ConversionError>,
    /// Task is suspended and did no work
    pub suspended: bool,
}

impl StepOutcome {
    fn suspended() -> Self {
        Self {
            suspended: true,
            ..Self::default()
        }
    }

    /// True when every channel was read and written without error
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.write_error.is_none() && self.conversion_error.is_none()
    }
}

/// Moving-average filter between an input bank and an output channel
pub struct SignalPipeline<'a, I, O, C> {
    inputs: I,
    output: O,
    converter: C,
    shared: &'a SharedState,
    window: MovingAverage<FILTER_WINDOW_LEN>,
}

impl<'a, I, O, C> SignalPipeline<'a, I, O, C>
where
    I: AnalogInputs,
    O: AnalogOutput,
    C: SampleConverter,
{
    /// Bring up every channel once
    ///
    /// Fails if the input bank lists more than [`MAX_INPUT_CHANNELS`]
    /// channels, or if either side is not ready or rejects its setup; the
    /// hosting task must not start sampling then.
    pub fn configure(
        mut inputs: I,
        mut output: O,
        converter: C,
        shared: &'a SharedState,
    ) -> Result<Self, SetupError> {
        let count = inputs.channels().len();
        if count > MAX_INPUT_CHANNELS {
            return Err(SetupError::TooManyChannels {
                count,
                max: MAX_INPUT_CHANNELS,
            });
        }
        bring_up(&mut inputs)?;
        bring_up(&mut output)?;

        Ok(Self {
            inputs,
            output,
            converter,
            shared,
            window: MovingAverage::new(),
        })
    }

    /// Run one sampling period
    pub fn step(&mut self) -> StepOutcome {
        if !self.stats().begin_cycle() {
            return StepOutcome::suspended();
        }

        let mut outcome = StepOutcome::default();
        let full_scale = self.output.full_scale();
        let telemetry = &self.shared.telemetry;
        for index in 0..self.inputs.channels().len() {
            let spec = self.inputs.channels()[index];
            let raw = match self.inputs.read(index) {
                Ok(raw) => raw,
                Err(e) => {
                    // `configure` bounds the channel count by the capacity
                    let _ = outcome.skipped.push((spec.id, e));
                    continue;
                }
            };

            let sample = spec.signed_sample(raw);
            self.window.push(sample);
            let filtered = self.window.output().min(full_scale);

            if let Err(e) = self.output.write(filtered) {
                outcome.write_error = Some(e);
            }

            telemetry.publish_raw(sample);
            telemetry.publish_filtered(filtered);
            match self.converter.to_millivolts(&spec, sample) {
                Ok(mv) => telemetry.publish_millivolts(mv),
                Err(e) => outcome.conversion_error = Some(e),
            }

            outcome.sampled += 1;
        }

        outcome
    }

    /// Record the busy time of a step that did work
    pub fn finish(&self, busy_us: u64) {
        self.stats().end_cycle(busy_us);
    }

    /// Interval before the next step (µs)
    pub fn sample_period_us(&self) -> u32 {
        self.shared.sample_period_us()
    }

    pub fn window(&self) -> &MovingAverage<FILTER_WINDOW_LEN> {
        &self.window
    }

    fn stats(&self) -> &TaskStats {
        self.shared.stats(TaskId::Filter)
    }
}
