//! CPU face-culling mesher: turns chunk block grids into plain vertex/index buffers.
#![forbid(unsafe_code)]

mod access;
mod atlas;
mod build;
mod cache;
mod face;
mod mesh_build;
mod neighbors;

pub use access::{BlockAccess, EmptyNeighbors};
pub use atlas::{AtlasCell, AtlasConfig, AtlasEntry, TextureAtlas};
pub use build::{Aabb, ChunkMesh, build_chunk_mesh, rebuild_chunk_mesh};
pub use cache::ChunkMeshes;
pub use face::{Face, FaceRole};
pub use mesh_build::{FLOATS_PER_VERTEX, INDICES_PER_QUAD, MeshBuild, VERTICES_PER_QUAD};
pub use neighbors::NeighborsLoaded;
