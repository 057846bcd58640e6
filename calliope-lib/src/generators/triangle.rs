//! Triangle-wave oscillator.

use crate::error::CalliopeError;
use crate::rate::SampleRate;
use crate::streamer::{Frame, Streamer};

/// An infinite symmetric triangle wave, identical on both channels.
///
/// The phase accumulator lives in `[0, 1)` and advances by
/// `frequency / sample_rate` per frame, keeping only the fractional part at
/// the wrap. Phase below one half maps to a descending ramp from 1 to -1,
/// the upper half to the ascending ramp back.
pub struct TriangleWave {
    // Phase increment per frame.
    dt: f64,
    // Current phase in [0, 1).
    t: f64,
}

impl TriangleWave {
    /// Create a triangle tone at `frequency` Hz.
    ///
    /// The sample rate must be more than twice the frequency; at or past the
    /// Nyquist limit the wave cannot be represented and construction fails.
    pub fn new(sample_rate: SampleRate, frequency: f64) -> Result<Self, CalliopeError> {
        let dt = frequency / sample_rate.0 as f64;
        if dt >= 0.5 {
            return Err(CalliopeError::NyquistViolation {
                frequency,
                sample_rate: sample_rate.0,
            });
        }
        Ok(TriangleWave { dt, t: 0.0 })
    }

    /// The current phase, in `[0, 1)`.
    pub fn phase(&self) -> f64 {
        self.t
    }
}

impl Streamer for TriangleWave {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        for frame in frames.iter_mut() {
            let value = if self.t < 0.5 {
                1.0 - 4.0 * self.t
            } else {
                4.0 * self.t - 3.0
            };
            *frame = [value as f32; 2];
            self.t = (self.t + self.dt).fract();
        }
        (frames.len(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(hz: u32) -> SampleRate {
        SampleRate::new(hz).unwrap()
    }

    #[test]
    fn rejects_frequency_at_or_above_nyquist() {
        assert!(matches!(
            TriangleWave::new(rate(1000), 600.0),
            Err(CalliopeError::NyquistViolation { .. })
        ));
        assert!(TriangleWave::new(rate(1000), 500.0).is_err());
        assert!(TriangleWave::new(rate(1000), 499.0).is_ok());
    }

    #[test]
    fn output_stays_in_range_on_both_channels() {
        let mut wave = TriangleWave::new(rate(44100), 440.0).unwrap();
        let mut frames = [[0.0_f32; 2]; 2048];
        let (n, more) = wave.stream(&mut frames);
        assert_eq!(n, frames.len());
        assert!(more);
        for frame in &frames {
            assert!(frame[0] >= -1.0 && frame[0] <= 1.0);
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn phase_wraps_after_one_full_period() {
        // 100 Hz at 44100 Hz: one period is exactly 441 frames.
        let mut wave = TriangleWave::new(rate(44100), 100.0).unwrap();
        let mut first = [[0.0_f32; 2]; 1];
        wave.stream(&mut first);

        let mut rest = [[0.0_f32; 2]; 440];
        wave.stream(&mut rest);
        assert!(
            wave.phase() < 1e-9 || wave.phase() > 1.0 - 1e-9,
            "phase did not return to its start: {}",
            wave.phase()
        );

        let mut wrapped = [[0.0_f32; 2]; 1];
        wave.stream(&mut wrapped);
        assert!((wrapped[0][0] - first[0][0]).abs() < 1e-5);
    }

    #[test]
    fn ramps_descend_then_ascend() {
        let mut wave = TriangleWave::new(rate(1000), 10.0).unwrap();
        // One period is 100 frames: 50 descending, 50 ascending.
        let mut frames = [[0.0_f32; 2]; 100];
        wave.stream(&mut frames);

        assert!((frames[0][0] - 1.0).abs() < 1e-6);
        for pair in frames[..50].windows(2) {
            assert!(pair[1][0] < pair[0][0]);
        }
        for pair in frames[50..].windows(2) {
            assert!(pair[1][0] > pair[0][0]);
        }
    }

    #[test]
    fn never_drains() {
        let mut wave = TriangleWave::new(rate(8000), 100.0).unwrap();
        for _ in 0..10 {
            let mut frames = [[0.0_f32; 2]; 64];
            let (n, more) = wave.stream(&mut frames);
            assert_eq!(n, 64);
            assert!(more);
        }
        assert!(wave.err().is_none());
    }
}
