//! Speaker: wires the mixer and sample pipeline to the output device.

use std::io::Read;
use std::sync::{Arc, Mutex, MutexGuard};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{debug, warn};

use crate::constants::{BYTES_PER_SAMPLE, CHANNEL_COUNT};
use crate::error::CalliopeError;
use crate::mixer::Mixer;
use crate::playback::pipeline::SampleReader;
use crate::playback::settings::PlaybackSettings;
use crate::rate::SampleRate;
use crate::streamer::Streamer;

/// Playback coordinator over one shared [`Mixer`].
///
/// Construction opens the default output device and starts a 16-bit stereo
/// stream whose callback pulls packed PCM through a [`SampleReader`]. All
/// control operations and the callback serialize on the same mutex, so a
/// caller holding [`Speaker::lock`] can safely mutate an already-playing
/// streamer.
pub struct Speaker {
    mixer: Arc<Mutex<Mixer>>,
    sample_rate: SampleRate,
    stream: Option<cpal::Stream>,
}

impl Speaker {
    /// Open the default output device and start streaming.
    ///
    /// `buffer_size` is in frames and is forced down to a power of two, the
    /// shape drivers handle most predictably.
    pub fn new(sample_rate: SampleRate, buffer_size: usize) -> Result<Self, CalliopeError> {
        let buffer_size = floor_power_of_two(buffer_size.max(1));

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(CalliopeError::NoOutputDevice)?;

        let supported = device.supported_output_configs()?.any(|range| {
            range.channels() as usize == CHANNEL_COUNT
                && range.sample_format() == cpal::SampleFormat::I16
                && sample_rate.0 >= range.min_sample_rate().0
                && sample_rate.0 <= range.max_sample_rate().0
        });
        if !supported {
            return Err(CalliopeError::UnsupportedConfig {
                sample_rate: sample_rate.0,
            });
        }

        let config = cpal::StreamConfig {
            channels: CHANNEL_COUNT as cpal::ChannelCount,
            sample_rate: cpal::SampleRate(sample_rate.0),
            buffer_size: cpal::BufferSize::Fixed(buffer_size as cpal::FrameCount),
        };

        let mixer = Arc::new(Mutex::new(Mixer::new()));
        let mut reader = SampleReader::new(mixer.clone());
        let mut bytes: Vec<u8> = Vec::new();

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                let byte_len = data.len() * BYTES_PER_SAMPLE;
                if bytes.len() < byte_len {
                    bytes.resize(byte_len, 0);
                }
                match reader.read(&mut bytes[..byte_len]) {
                    Ok(_) => {
                        for (sample, pair) in data.iter_mut().zip(bytes[..byte_len].chunks_exact(2))
                        {
                            *sample = i16::from_le_bytes([pair[0], pair[1]]);
                        }
                    }
                    Err(err) => {
                        warn!("sample pipeline read failed, streaming silence: {err}");
                        data.fill(0);
                    }
                }
            },
            move |err| {
                warn!("error during playback: {err}");
            },
        )?;
        stream.play()?;

        debug!(
            "speaker started at {} Hz with a {} frame buffer",
            sample_rate.0, buffer_size
        );

        Ok(Speaker {
            mixer,
            sample_rate,
            stream: Some(stream),
        })
    }

    /// Open a speaker from deserialized [`PlaybackSettings`].
    pub fn from_settings(settings: &PlaybackSettings) -> Result<Self, CalliopeError> {
        let rate = SampleRate::new(settings.sample_rate)?;
        Self::new(rate, settings.buffer_size)
    }

    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Start playing the given streamers through the speaker.
    pub fn play<I>(&self, streamers: I)
    where
        I: IntoIterator<Item = Box<dyn Streamer>>,
    {
        self.mixer.lock().unwrap().add_all(streamers);
    }

    /// Remove all currently playing streamers from the speaker.
    pub fn clear(&self) {
        self.mixer.lock().unwrap().clear();
    }

    /// Lock the mixer against the pull thread.
    ///
    /// While the guard is held the speaker won't pull new data, so this is
    /// the way to modify a currently playing streamer without racing the
    /// audio callback. Hold it for as little time as possible to avoid
    /// playback glitches.
    pub fn lock(&self) -> MutexGuard<'_, Mixer> {
        self.mixer.lock().unwrap()
    }

    /// Stop playback and release the output stream.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.pause() {
                warn!("error while stopping playback: {err}");
            }
        }
    }
}

impl Drop for Speaker {
    fn drop(&mut self) {
        self.close();
    }
}

fn floor_power_of_two(n: usize) -> usize {
    if n.is_power_of_two() {
        n
    } else {
        n.next_power_of_two() >> 1
    }
}
