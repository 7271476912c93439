use hashbrown::HashMap;
use quarry_blocks::BlockRegistry;
use quarry_chunk::ChunkCoord;
use quarry_world::World;

use crate::atlas::TextureAtlas;
use crate::build::{ChunkMesh, build_chunk_mesh, rebuild_chunk_mesh};
use crate::neighbors::NeighborsLoaded;

/// Built meshes keyed by chunk coordinate, kept in step with a `World`.
///
/// A chunk is remeshed when it is dirty, has never been meshed, or the set of
/// resident horizontal neighbors differs from the one its mesh was built
/// against. Meshing consumes the chunk's dirty flag.
#[derive(Default)]
pub struct ChunkMeshes {
    meshes: HashMap<ChunkCoord, ChunkMesh>,
    rebuilt: Vec<ChunkCoord>,
    dropped: Vec<ChunkCoord>,
}

impl ChunkMeshes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the cache up to date with `world`; returns how many meshes were (re)built.
    pub fn update(&mut self, world: &mut World, reg: &BlockRegistry, atlas: &TextureAtlas) -> usize {
        self.rebuilt.clear();
        self.dropped.clear();
        let dropped = &mut self.dropped;
        self.meshes.retain(|c, _| {
            let keep = world.has_chunk(c.cx, c.cz);
            if !keep {
                dropped.push(*c);
            }
            keep
        });

        let stale: Vec<ChunkCoord> = world
            .iter()
            .filter(|(coord, chunk)| match self.meshes.get(coord) {
                None => true,
                Some(mesh) => {
                    chunk.is_dirty() || mesh.neighbors != NeighborsLoaded::probe(&*world, *coord)
                }
            })
            .map(|(coord, _)| coord)
            .collect();

        for &coord in &stale {
            let Some(chunk) = world.chunk(coord) else {
                continue;
            };
            match self.meshes.get_mut(&coord) {
                Some(mesh) => rebuild_chunk_mesh(mesh, chunk, &*world, reg, atlas),
                None => {
                    let mesh = build_chunk_mesh(chunk, &*world, reg, atlas);
                    self.meshes.insert(coord, mesh);
                }
            }
        }
        for &coord in &stale {
            if let Some(chunk) = world.chunk_mut(coord) {
                chunk.mark_clean();
            }
        }

        if !stale.is_empty() || !self.dropped.is_empty() {
            log::debug!(
                "meshes: rebuilt={} dropped={} cached={}",
                stale.len(),
                self.dropped.len(),
                self.meshes.len()
            );
        }
        self.rebuilt = stale;
        self.rebuilt.len()
    }

    /// Chunks meshed by the last `update`.
    #[inline]
    pub fn rebuilt(&self) -> &[ChunkCoord] {
        &self.rebuilt
    }

    /// Chunks whose meshes the last `update` discarded because they unloaded.
    #[inline]
    pub fn dropped(&self) -> &[ChunkCoord] {
        &self.dropped
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.meshes.get(&coord)
    }

    /// Whether a mesh exists for `coord`. A built mesh may still be stale
    /// until the next `update`.
    #[inline]
    pub fn is_built(&self, coord: ChunkCoord) -> bool {
        self.meshes.contains_key(&coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChunkMesh> + '_ {
        self.meshes.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn remove(&mut self, coord: ChunkCoord) -> Option<ChunkMesh> {
        self.meshes.remove(&coord)
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
    }
}
