//! Channel readiness and setup
//!
//! Every line and channel is brought up exactly once at startup. A device
//! that never reports ready, or a channel whose configuration is rejected,
//! is a fatal configuration error: the owner stops initializing and does
//! not retry.

/// Startup configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    /// The controller behind the channel is not ready
    NotReady,
    /// The controller refused the configuration of one channel
    ChannelRejected {
        /// Channel identifier as reported by [`crate::ChannelSpec::id`]
        channel: u8,
    },
    /// The requested resolution is not supported by the hardware
    UnsupportedResolution(u8),
    /// More channels than the consumer can sample each period
    TooManyChannels {
        count: usize,
        max: usize,
    },
}

impl core::fmt::Display for SetupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SetupError::NotReady => write!(f, "device not ready"),
            SetupError::ChannelRejected { channel } => {
                write!(f, "could not set up channel #{}", channel)
            }
            SetupError::UnsupportedResolution(bits) => {
                write!(f, "unsupported resolution: {} bits", bits)
            }
            SetupError::TooManyChannels { count, max } => {
                write!(f, "{} channels configured, at most {} supported", count, max)
            }
        }
    }
}

/// Ready check and one-time setup
pub trait Setup {
    /// Whether the underlying controller has finished its own initialization
    fn is_ready(&self) -> bool;

    /// Apply the channel configuration
    ///
    /// Called once, only after [`Setup::is_ready`] returned `true`.
    fn setup(&mut self) -> Result<(), SetupError>;
}

/// Check readiness, then configure
///
/// This is the only sanctioned way to initialize a channel: it guarantees
/// `setup` never runs against a controller that is not ready.
pub fn bring_up<T: Setup + ?Sized>(device: &mut T) -> Result<(), SetupError> {
    if !device.is_ready() {
        return Err(SetupError::NotReady);
    }
    device.setup()
}
