//! Signal generators implementing the [`crate::Streamer`] contract.

mod triangle;

pub use triangle::TriangleWave;
