//! # Calliope Audio Library
//!
//! This library provides the core mixing and playback functionalities for the
//! Calliope audio player. Producers implement the pull-based [`Streamer`]
//! contract, a [`Mixer`] sums an arbitrary, changing set of them, and the
//! playback layer packs the mixed frames into 16-bit PCM for the output
//! device.

pub mod constants;
pub mod error;
pub mod generators;
pub mod mixer;
pub mod playback;
pub mod rate;
pub mod streamer;

pub use error::CalliopeError;
pub use mixer::Mixer;
pub use playback::pipeline::SampleReader;
pub use playback::settings::PlaybackSettings;
pub use playback::speaker::Speaker;
pub use rate::SampleRate;
pub use streamer::{Frame, Streamer};
