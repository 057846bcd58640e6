//! Sample-rate arithmetic helpers.

use std::time::Duration;

use crate::error::CalliopeError;

/// A sample rate in samples per second.
///
/// Wraps the raw integer so rate-aware code can convert between sample
/// counts and wall-clock time without scattering the arithmetic around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// Validate and wrap a raw rate. Zero is rejected.
    pub fn new(rate: u32) -> Result<Self, CalliopeError> {
        if rate == 0 {
            return Err(CalliopeError::InvalidSampleRate);
        }
        Ok(SampleRate(rate))
    }

    /// The wall-clock duration of `samples` frames at this rate.
    pub fn duration(&self, samples: usize) -> Duration {
        Duration::from_secs_f64(samples as f64 / self.0 as f64)
    }

    /// The number of frames spanning `duration` at this rate, rounded to
    /// the nearest whole frame.
    ///
    /// Rounding keeps `samples(duration(n)) == n` even though `Duration`
    /// only holds whole nanoseconds.
    pub fn samples(&self, duration: Duration) -> usize {
        (duration.as_secs_f64() * self.0 as f64).round() as usize
    }
}

impl From<SampleRate> for u32 {
    fn from(rate: SampleRate) -> u32 {
        rate.0
    }
}
