//! Dynamic summing mixer over an arbitrary, changing set of streamers.

use log::trace;

use crate::constants::MIX_CHUNK_FRAMES;
use crate::streamer::{Frame, Streamer};

/// Mixes an arbitrary number of [`Streamer`]s, removing drained ones as it
/// goes. The mixer's own stream never drains: when empty it streams silence.
///
/// Streamers are exclusively owned by the mixer once added. A child that
/// reports exhaustion is dropped before the next `stream` call; any partial
/// frames it produced on its final call are still mixed in.
pub struct Mixer {
    streamers: Vec<Box<dyn Streamer>>,
    // Reused across calls; bounds the chunk pulled from any one child.
    scratch: Vec<Frame>,
}

impl Mixer {
    pub fn new() -> Self {
        Mixer {
            streamers: Vec::new(),
            scratch: vec![[0.0; 2]; MIX_CHUNK_FRAMES],
        }
    }

    /// Number of streamers currently playing in the mixer.
    pub fn len(&self) -> usize {
        self.streamers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streamers.is_empty()
    }

    /// Add a streamer to the mix. Ownership transfers to the mixer.
    pub fn add(&mut self, streamer: Box<dyn Streamer>) {
        self.streamers.push(streamer);
    }

    /// Add every streamer yielded by `streamers`.
    pub fn add_all<I>(&mut self, streamers: I)
    where
        I: IntoIterator<Item = Box<dyn Streamer>>,
    {
        self.streamers.extend(streamers);
    }

    /// Remove all streamers. Subsequent calls stream silence until new
    /// streamers are added.
    pub fn clear(&mut self) {
        self.streamers.clear();
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Streamer for Mixer {
    /// Streams all children mixed together. Always returns
    /// `(frames.len(), true)`; with no children this streams silence.
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        let mut offset = 0;

        while offset < frames.len() {
            let chunk = (frames.len() - offset).min(self.scratch.len());
            let dst = &mut frames[offset..offset + chunk];

            for frame in dst.iter_mut() {
                *frame = [0.0; 2];
            }

            let mut i = 0;
            while i < self.streamers.len() {
                let (n, more) = self.streamers[i].stream(&mut self.scratch[..chunk]);
                for (out, mixed) in dst[..n].iter_mut().zip(&self.scratch[..n]) {
                    out[0] += mixed[0];
                    out[1] += mixed[1];
                }
                if more {
                    i += 1;
                } else {
                    // Swap-remove keeps removal O(1); the swapped-in child
                    // is processed on this same pass since i stays put.
                    self.streamers.swap_remove(i);
                    trace!("removed drained streamer, {} remaining", self.streamers.len());
                }
            }

            offset += chunk;
        }

        (frames.len(), true)
    }

    /// Always `None`.
    ///
    /// Erroring streamers drain and are removed on the spot, and one
    /// streamer's failure must never break the whole mix; causes are
    /// queryable on the streamer itself, where they happen.
    fn err(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emits a constant value on both channels for a fixed number of frames,
    /// then drains.
    struct ConstTone {
        value: f32,
        remaining: usize,
    }

    impl ConstTone {
        fn new(value: f32, frames: usize) -> Self {
            ConstTone {
                value,
                remaining: frames,
            }
        }

        fn endless(value: f32) -> Self {
            Self::new(value, usize::MAX)
        }
    }

    impl Streamer for ConstTone {
        fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
            let n = frames.len().min(self.remaining);
            for frame in frames[..n].iter_mut() {
                *frame = [self.value; 2];
            }
            self.remaining -= n;
            (n, self.remaining > 0)
        }
    }

    #[test]
    fn empty_mixer_streams_silence() {
        let mut mixer = Mixer::new();
        let mut frames = [[0.5_f32; 2]; 8];
        let (n, more) = mixer.stream(&mut frames);
        assert_eq!(n, 8);
        assert!(more);
        assert!(frames.iter().all(|f| *f == [0.0, 0.0]));
    }

    #[test]
    fn sums_active_streamers() {
        let mut mixer = Mixer::new();
        mixer.add(Box::new(ConstTone::endless(0.25)));
        mixer.add(Box::new(ConstTone::endless(0.5)));
        assert_eq!(mixer.len(), 2);

        let mut frames = [[0.0_f32; 2]; 16];
        let (n, more) = mixer.stream(&mut frames);
        assert_eq!(n, 16);
        assert!(more);
        for frame in &frames {
            assert!((frame[0] - 0.75).abs() < 1e-6);
            assert!((frame[1] - 0.75).abs() < 1e-6);
        }
    }

    #[test]
    fn drained_streamer_is_removed_and_partial_output_kept() {
        let mut mixer = Mixer::new();
        mixer.add(Box::new(ConstTone::new(0.5, 3)));
        mixer.add(Box::new(ConstTone::endless(0.25)));

        let mut frames = [[0.0_f32; 2]; 8];
        let (n, _) = mixer.stream(&mut frames);
        assert_eq!(n, 8);
        assert_eq!(mixer.len(), 1);

        // First three frames carry both streamers, the rest only the
        // endless one.
        for frame in &frames[..3] {
            assert!((frame[0] - 0.75).abs() < 1e-6);
        }
        for frame in &frames[3..] {
            assert!((frame[0] - 0.25).abs() < 1e-6);
        }
    }

    #[test]
    fn drained_with_zero_frames_is_removed() {
        let mut mixer = Mixer::new();
        mixer.add(Box::new(ConstTone::new(1.0, 0)));
        let mut frames = [[0.0_f32; 2]; 4];
        mixer.stream(&mut frames);
        assert_eq!(mixer.len(), 0);
        assert!(frames.iter().all(|f| *f == [0.0, 0.0]));
    }

    #[test]
    fn removal_does_not_skip_the_swapped_in_streamer() {
        let mut mixer = Mixer::new();
        // The first streamer drains immediately; swap-remove moves the last
        // one into its slot, and that one must still be mixed this pass.
        mixer.add(Box::new(ConstTone::new(0.0, 0)));
        mixer.add(Box::new(ConstTone::endless(0.125)));
        mixer.add(Box::new(ConstTone::endless(0.25)));

        let mut frames = [[0.0_f32; 2]; 4];
        mixer.stream(&mut frames);
        assert_eq!(mixer.len(), 2);
        for frame in &frames {
            assert!((frame[0] - 0.375).abs() < 1e-6);
        }
    }

    #[test]
    fn requests_larger_than_the_scratch_chunk() {
        let mut mixer = Mixer::new();
        mixer.add(Box::new(ConstTone::endless(0.1)));

        let mut frames = vec![[0.0_f32; 2]; MIX_CHUNK_FRAMES * 2 + 37];
        let (n, more) = mixer.stream(&mut frames);
        assert_eq!(n, frames.len());
        assert!(more);
        assert!(frames.iter().all(|f| (f[0] - 0.1).abs() < 1e-6));
    }

    #[test]
    fn clear_empties_the_mix() {
        let mut mixer = Mixer::new();
        mixer.add(Box::new(ConstTone::endless(1.0)));
        mixer.add(Box::new(ConstTone::endless(1.0)));
        mixer.clear();
        assert!(mixer.is_empty());

        let mut frames = [[0.0_f32; 2]; 4];
        mixer.stream(&mut frames);
        assert!(frames.iter().all(|f| *f == [0.0, 0.0]));
    }

    #[test]
    fn mixer_never_reports_an_error() {
        let mixer = Mixer::new();
        assert!(mixer.err().is_none());
    }
}
