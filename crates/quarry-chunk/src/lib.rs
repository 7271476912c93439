//! Chunk storage, chunk coordinates, and terrain generation.
#![forbid(unsafe_code)]

mod chunk;
mod chunk_coord;
pub mod terrain;

pub use chunk::Chunk;
pub use chunk_coord::ChunkCoord;
pub use terrain::{HeightWave, NoiseLayer, TerrainError, TerrainGenerator, TerrainLayers, TerrainParams};

pub const CHUNK_SIZE_X: usize = 16;
pub const CHUNK_SIZE_Y: usize = 256;
pub const CHUNK_SIZE_Z: usize = 16;
pub const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;

/// Horizontal chunk edge length; X and Z are equal.
pub const CHUNK_SIZE: i32 = CHUNK_SIZE_X as i32;
