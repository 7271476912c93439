use quarry_blocks::BlockType;

use crate::chunk_coord::ChunkCoord;
use crate::terrain::TerrainGenerator;
use crate::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, CHUNK_VOLUME};

/// A 16x256x16 column of block-type ids.
///
/// Stored as a flat array indexed `y*(16*16) + z*16 + x`. Every accessor is
/// total: reads outside the grid return AIR and writes outside it are ignored,
/// so neighbor probes one cell past an edge need no special casing.
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    blocks: Box<[BlockType]>,
    dirty: bool,
}

impl Chunk {
    /// An all-air chunk at `coord`. Starts clean.
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![BlockType::AIR; CHUNK_VOLUME].into_boxed_slice(),
            dirty: false,
        }
    }

    /// A chunk at `coord` filled by `terrain`.
    pub fn generated(coord: ChunkCoord, terrain: &TerrainGenerator) -> Self {
        let mut chunk = Self::new(coord);
        chunk.generate(terrain);
        chunk
    }

    #[inline]
    pub const fn volume() -> usize {
        CHUNK_VOLUME
    }

    #[inline]
    pub const fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && x < CHUNK_SIZE_X as i32
            && y >= 0
            && y < CHUNK_SIZE_Y as i32
            && z >= 0
            && z < CHUNK_SIZE_Z as i32
    }

    /// Linear storage index, or `None` outside the grid.
    #[inline]
    pub const fn index(x: i32, y: i32, z: i32) -> Option<usize> {
        if Self::in_bounds(x, y, z) {
            Some((y as usize) * (CHUNK_SIZE_X * CHUNK_SIZE_Z) + (z as usize) * CHUNK_SIZE_X + x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn chunk_x(&self) -> i32 {
        self.coord.cx
    }

    #[inline]
    pub fn chunk_z(&self) -> i32 {
        self.coord.cz
    }

    /// World-space position of local `(0, 0, 0)`.
    #[inline]
    pub fn world_origin(&self) -> (i64, i64, i64) {
        let (x, z) = self.coord.origin();
        (x, 0, z)
    }

    #[inline]
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        match Self::index(x, y, z) {
            Some(i) => self.blocks[i],
            None => BlockType::AIR,
        }
    }

    #[inline]
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, ty: BlockType) {
        if let Some(i) = Self::index(x, y, z) {
            self.blocks[i] = ty;
            self.dirty = true;
        }
    }

    pub fn fill(&mut self, ty: BlockType) {
        self.blocks.fill(ty);
        self.dirty = true;
    }

    #[inline]
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by whoever consumed the current state (mesher, saver).
    #[inline]
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Flags the chunk for re-consumption without changing any block, e.g.
    /// after a neighbor's border cell changed.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|b| b.is_air())
    }

    /// Y of the highest non-air cell in local column `(x, z)`.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        if !Self::in_bounds(x, 0, z) {
            return None;
        }
        (0..CHUNK_SIZE_Y as i32)
            .rev()
            .find(|&y| !self.get_block(x, y, z).is_air())
    }

    /// Rebuilds every column from `terrain`. Deterministic in the chunk
    /// coordinate; calling it twice yields identical storage.
    pub fn generate(&mut self, terrain: &TerrainGenerator) {
        let base_x = i64::from(self.coord.cx) * CHUNK_SIZE_X as i64;
        let base_z = i64::from(self.coord.cz) * CHUNK_SIZE_Z as i64;
        let layer = CHUNK_SIZE_X * CHUNK_SIZE_Z;
        for z in 0..CHUNK_SIZE_Z {
            for x in 0..CHUNK_SIZE_X {
                let surface = terrain.height_at(base_x + x as i64, base_z + z as i64);
                for y in 0..CHUNK_SIZE_Y {
                    self.blocks[y * layer + z * CHUNK_SIZE_X + x] = terrain.layer_at(y as i32, surface);
                }
            }
        }
        self.dirty = true;
        log::trace!("generated chunk ({}, {})", self.coord.cx, self.coord.cz);
    }
}
