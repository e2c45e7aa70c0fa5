//! Configuration type definitions
//!
//! These types describe the controller's startup configuration. On the
//! firmware they are filled from `controller.toml` by the build script,
//! validated there, and baked into the binary as constants.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of samples in the moving-average window
pub const FILTER_WINDOW_LEN: usize = 30;

/// Maximum number of analog input channels sampled per period
pub const MAX_INPUT_CHANNELS: usize = 4;

/// Lowest accepted sampling frequency (Hz)
pub const MIN_SAMPLE_RATE_HZ: u32 = 1;

/// Highest accepted sampling frequency (Hz)
pub const MAX_SAMPLE_RATE_HZ: u32 = 100_000;

/// Microseconds per second, for frequency/period conversion
pub const MICROS_PER_SECOND: u32 = 1_000_000;

/// Number of NVIC priority levels on Cortex-M0+ (two priority bits)
pub const PRIORITY_LEVELS: u8 = 4;

/// Blink task settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct BlinkConfig {
    /// Initial blink period (ms)
    pub period_ms: u32,
    /// Minimum interval between accepted button edges (ms), 0 disables
    pub debounce_ms: u32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkConfig {
    pub const fn new() -> Self {
        Self {
            period_ms: 1000,
            debounce_ms: 0,
        }
    }
}

/// Filter task settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SamplingConfig {
    /// Initial sample period (µs)
    pub period_us: u32,
    /// Input converter resolution (bits)
    pub adc_resolution_bits: u8,
    /// Input converter reference voltage (mV)
    pub adc_reference_mv: u16,
    /// Treat input readings as signed differential samples
    pub differential: bool,
    /// Output channel resolution (bits)
    pub dac_resolution_bits: u8,
    /// Board calibration: offset added after scaling (mV)
    pub offset_mv: i32,
    /// Board calibration: gain in thousandths (1000 = unity)
    pub gain_permille: u16,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SamplingConfig {
    pub const fn new() -> Self {
        Self {
            period_us: 1000,
            adc_resolution_bits: 12,
            adc_reference_mv: 3300,
            differential: false,
            dac_resolution_bits: 12,
            offset_mv: 0,
            gain_permille: 1000,
        }
    }

    /// Sampling frequency implied by the configured period
    pub const fn rate_hz(&self) -> u32 {
        if self.period_us == 0 {
            0
        } else {
            MICROS_PER_SECOND / self.period_us
        }
    }
}

/// Scheduling priorities
///
/// Lower numbers preempt higher ones, matching the NVIC convention. The
/// button edge handler must outrank both periodic tasks, and the filter
/// task must outrank the blink task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PriorityConfig {
    /// Button edge handler
    pub edge: u8,
    /// Hard real-time filter task
    pub filter: u8,
    /// Soft real-time blink task
    pub led: u8,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityConfig {
    pub const fn new() -> Self {
        Self {
            edge: 1,
            filter: 2,
            led: 3,
        }
    }
}

/// System-wide resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SystemConfig {
    /// Heap size handed to the allocator (bytes)
    pub heap_bytes: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemConfig {
    pub const fn new() -> Self {
        Self { heap_bytes: 4096 }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ControllerConfig {
    pub blink: BlinkConfig,
    pub sampling: SamplingConfig,
    pub priorities: PriorityConfig,
    pub system: SystemConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Blink period must be positive
    ZeroBlinkPeriod,
    /// Sample period does not correspond to a rate in the accepted range
    SamplePeriodOutOfRange(u32),
    /// Converter resolution outside 1..=16 bits
    InvalidResolution(u8),
    /// Reference voltage must be positive
    ZeroReference,
    /// Calibration gain must be positive
    ZeroGain,
    /// Priority beyond the available NVIC levels
    PriorityOutOfRange(u8),
    /// Edge handler must outrank filter, filter must outrank blink
    PriorityOrder,
    /// Heap size must be positive
    ZeroHeap,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroBlinkPeriod => write!(f, "blink.period_ms must be > 0"),
            ConfigError::SamplePeriodOutOfRange(us) => write!(
                f,
                "sampling.period_us = {} is outside {}..={} µs",
                us,
                MICROS_PER_SECOND / MAX_SAMPLE_RATE_HZ,
                MICROS_PER_SECOND / MIN_SAMPLE_RATE_HZ
            ),
            ConfigError::InvalidResolution(bits) => {
                write!(f, "resolution of {} bits is outside 1..=16", bits)
            }
            ConfigError::ZeroReference => write!(f, "sampling.adc_reference_mv must be > 0"),
            ConfigError::ZeroGain => write!(f, "sampling.gain_permille must be > 0"),
            ConfigError::PriorityOutOfRange(p) => write!(
                f,
                "priority {} exceeds the lowest level {}",
                p,
                PRIORITY_LEVELS - 1
            ),
            ConfigError::PriorityOrder => {
                write!(f, "priorities must satisfy edge < filter < led")
            }
            ConfigError::ZeroHeap => write!(f, "system.heap_bytes must be > 0"),
        }
    }
}

impl ControllerConfig {
    pub const fn new() -> Self {
        Self {
            blink: BlinkConfig::new(),
            sampling: SamplingConfig::new(),
            priorities: PriorityConfig::new(),
            system: SystemConfig::new(),
        }
    }

    /// Check every invariant the firmware relies on at startup
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blink.period_ms == 0 {
            return Err(ConfigError::ZeroBlinkPeriod);
        }

        let min_period = MICROS_PER_SECOND / MAX_SAMPLE_RATE_HZ;
        let max_period = MICROS_PER_SECOND / MIN_SAMPLE_RATE_HZ;
        let period = self.sampling.period_us;
        if period < min_period || period > max_period {
            return Err(ConfigError::SamplePeriodOutOfRange(period));
        }

        for bits in [
            self.sampling.adc_resolution_bits,
            self.sampling.dac_resolution_bits,
        ] {
            if bits == 0 || bits > 16 {
                return Err(ConfigError::InvalidResolution(bits));
            }
        }

        if self.sampling.adc_reference_mv == 0 {
            return Err(ConfigError::ZeroReference);
        }
        if self.sampling.gain_permille == 0 {
            return Err(ConfigError::ZeroGain);
        }

        let p = &self.priorities;
        for level in [p.edge, p.filter, p.led] {
            if level >= PRIORITY_LEVELS {
                return Err(ConfigError::PriorityOutOfRange(level));
            }
        }
        if !(p.edge < p.filter && p.filter < p.led) {
            return Err(ConfigError::PriorityOrder);
        }

        if self.system.heap_bytes == 0 {
            return Err(ConfigError::ZeroHeap);
        }

        Ok(())
    }
}
