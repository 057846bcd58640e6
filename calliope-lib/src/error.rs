//! Library error types.

use std::fmt;

/// Errors surfaced by construction, packing, and device wiring.
///
/// Producer-local failures never appear here: a failing streamer drains
/// itself out of the mixer and its cause stays queryable through its own
/// [`crate::Streamer::err`].
#[derive(Debug)]
pub enum CalliopeError {
    /// Generator frequency at or above half the sample rate.
    NyquistViolation { frequency: f64, sample_rate: u32 },
    /// A sample rate of zero was supplied.
    InvalidSampleRate,
    /// A byte buffer whose length is not a whole number of frames was
    /// handed to the sample pipeline.
    UnalignedBuffer { len: usize },
    /// No default output device is available on the host.
    NoOutputDevice,
    /// The output device does not support the requested stream shape.
    UnsupportedConfig { sample_rate: u32 },
    /// The device configurations could not be queried.
    ConfigQuery(cpal::SupportedStreamConfigsError),
    /// The output stream could not be built.
    BuildStream(cpal::BuildStreamError),
    /// The output stream could not be started.
    PlayStream(cpal::PlayStreamError),
}

impl fmt::Display for CalliopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalliopeError::NyquistViolation {
                frequency,
                sample_rate,
            } => write!(
                f,
                "frequency {frequency} Hz is at or above the Nyquist limit for {sample_rate} Hz"
            ),
            CalliopeError::InvalidSampleRate => write!(f, "sample rate must be positive"),
            CalliopeError::UnalignedBuffer { len } => write!(
                f,
                "buffer length {len} is not a multiple of the frame size (4 bytes)"
            ),
            CalliopeError::NoOutputDevice => write!(f, "no default output device available"),
            CalliopeError::UnsupportedConfig { sample_rate } => write!(
                f,
                "output device does not support 16-bit stereo at {sample_rate} Hz"
            ),
            CalliopeError::ConfigQuery(e) => write!(f, "could not query output configs: {e}"),
            CalliopeError::BuildStream(e) => write!(f, "could not build output stream: {e}"),
            CalliopeError::PlayStream(e) => write!(f, "could not start output stream: {e}"),
        }
    }
}

impl std::error::Error for CalliopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalliopeError::ConfigQuery(e) => Some(e),
            CalliopeError::BuildStream(e) => Some(e),
            CalliopeError::PlayStream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<cpal::SupportedStreamConfigsError> for CalliopeError {
    fn from(e: cpal::SupportedStreamConfigsError) -> Self {
        CalliopeError::ConfigQuery(e)
    }
}

impl From<cpal::BuildStreamError> for CalliopeError {
    fn from(e: cpal::BuildStreamError) -> Self {
        CalliopeError::BuildStream(e)
    }
}

impl From<cpal::PlayStreamError> for CalliopeError {
    fn from(e: cpal::PlayStreamError) -> Self {
        CalliopeError::PlayStream(e)
    }
}
