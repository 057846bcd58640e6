//! Playback layer: PCM packing and output-device wiring.

pub mod pipeline;
pub mod settings;
pub mod speaker;
