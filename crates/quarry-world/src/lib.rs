//! Sparse chunk map and world-coordinate addressing.
#![forbid(unsafe_code)]

mod coords;
mod world;

pub use coords::{world_to_chunk_coord, world_to_local_coord};
pub use quarry_chunk::{CHUNK_SIZE, Chunk, ChunkCoord};
pub use world::{MAX_STREAM_RADIUS, UpdateReport, World};
