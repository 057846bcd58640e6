//! Serialized playback configuration.

use serde::{Deserialize, Serialize};

use crate::constants::SAMPLE_RATE;

const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Playback parameters for wiring a [`crate::Speaker`] to the output device.
///
/// `buffer_size` is the speaker buffer in frames: bigger means lower CPU
/// usage and more robust playback, smaller means better responsiveness and
/// less delay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    pub sample_rate: u32,
    pub buffer_size: usize,
}

impl PlaybackSettings {
    pub fn new(sample_rate: u32, buffer_size: usize) -> Self {
        Self {
            sample_rate,
            buffer_size,
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}
