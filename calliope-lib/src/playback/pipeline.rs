//! Sample pipeline: pulls mixed frames and packs them into 16-bit PCM.

use std::io;
use std::sync::{Arc, Mutex};

use crate::constants::{BYTES_PER_FRAME, BYTES_PER_SAMPLE};
use crate::error::CalliopeError;
use crate::mixer::Mixer;
use crate::streamer::{Frame, Streamer};

/// Reads mixed audio as packed bytes: interleaved stereo, signed 16-bit,
/// little-endian.
///
/// Each [`io::Read::read`] call locks the shared mixer for exactly one
/// `stream` call; that lock is the single serialization point between the
/// real-time pull thread and control threads mutating the streamer set.
///
/// The frame scratch buffer grows to the largest request seen and is then
/// reused, so steady-state reads allocate nothing.
pub struct SampleReader {
    mixer: Arc<Mutex<Mixer>>,
    frames: Vec<Frame>,
}

impl SampleReader {
    pub fn new(mixer: Arc<Mutex<Mixer>>) -> Self {
        SampleReader {
            mixer,
            frames: Vec::new(),
        }
    }
}

impl io::Read for SampleReader {
    /// Fill `buf` with packed PCM pulled from the mixer.
    ///
    /// `buf.len()` must be a whole number of frames (a multiple of 4 bytes);
    /// anything else is a programming error on the caller's side and is
    /// rejected without touching any state. On success the buffer is always
    /// filled completely, since the mixer never drains.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.len() % BYTES_PER_FRAME != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                CalliopeError::UnalignedBuffer { len: buf.len() },
            ));
        }

        let num_frames = buf.len() / BYTES_PER_FRAME;
        if self.frames.len() < num_frames {
            self.frames.resize(num_frames, [0.0; 2]);
        }

        {
            let mut mixer = self.mixer.lock().unwrap();
            mixer.stream(&mut self.frames[..num_frames]);
        }

        for (i, frame) in self.frames[..num_frames].iter().enumerate() {
            for (channel, &value) in frame.iter().enumerate() {
                let clamped = value.clamp(-1.0, 1.0);
                let sample = (clamped * i16::MAX as f32) as i16;
                let [low, high] = sample.to_le_bytes();
                let at = i * BYTES_PER_FRAME + channel * BYTES_PER_SAMPLE;
                buf[at] = low;
                buf[at + 1] = high;
            }
        }

        Ok(num_frames * BYTES_PER_FRAME)
    }
}
