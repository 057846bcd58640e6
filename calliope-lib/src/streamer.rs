//! The pull-based producer contract every audio source implements.

use std::error::Error;

/// One time-step of stereo audio: a (left, right) sample pair.
///
/// Samples are nominally in `[-1.0, 1.0]` but producers are not required to
/// clamp; clipping happens once, in the sample pipeline.
pub type Frame = [f32; 2];

/// A pull-based producer of audio frames.
///
/// `stream` fills as much of the destination as it can and reports how many
/// frames it filled together with whether more data is available. Exactly two
/// outcomes are observable per call:
///
/// - `(n, true)` with `n == frames.len()`: fully filled, not exhausted.
/// - `(n, false)` with `n < frames.len()`: the producer drained after `n`
///   valid frames. Slots past `n` are undefined and must not be read.
///
/// Once a streamer reports exhaustion it must never produce further valid
/// data. Implementations must not block: the mixer pulls from the real-time
/// audio thread and a stalled producer is an audible glitch.
pub trait Streamer: Send {
    /// Fill up to `frames.len()` frames, advancing internal state by exactly
    /// the number of frames produced.
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool);

    /// The last fatal condition this streamer hit, if any.
    ///
    /// Non-blocking and side-effect free; purely diagnostic. The mixer never
    /// inspects it, it only reacts to exhaustion.
    fn err(&self) -> Option<&(dyn Error + Send + Sync)> {
        None
    }
}

impl<S: Streamer + ?Sized> Streamer for Box<S> {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        (**self).stream(frames)
    }

    fn err(&self) -> Option<&(dyn Error + Send + Sync)> {
        (**self).err()
    }
}
