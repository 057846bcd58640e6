//! Shared constants for mixing and playback defaults.

/// Default sample rate used by the library (Hz).
///
/// This is used by the CLI and as a fallback in components that do not
/// provide their own sample rate.
pub const SAMPLE_RATE: u32 = 44100;

/// Number of channels in a [`crate::Frame`].
pub const CHANNEL_COUNT: usize = 2;

/// Bytes per encoded channel sample (signed 16-bit PCM).
pub const BYTES_PER_SAMPLE: usize = 2;

/// Bytes per encoded frame (two channels of 16-bit PCM).
pub const BYTES_PER_FRAME: usize = CHANNEL_COUNT * BYTES_PER_SAMPLE;

/// Capacity of the mixer's reusable scratch buffer, in frames.
///
/// `Mixer::stream` processes requests in chunks of at most this many frames,
/// so scratch memory stays bounded regardless of the request size.
pub const MIX_CHUNK_FRAMES: usize = 512;
