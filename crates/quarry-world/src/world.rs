use hashbrown::HashMap;
use quarry_blocks::BlockType;
use quarry_chunk::{CHUNK_SIZE, CHUNK_SIZE_Y, Chunk, ChunkCoord, TerrainError, TerrainGenerator, TerrainParams};
use rayon::prelude::*;

use crate::coords::{world_to_chunk_coord, world_to_local_coord};

/// Largest radius `World::update` streams; larger requests are clamped to it.
pub const MAX_STREAM_RADIUS: u32 = 32;

/// Chunks loaded and unloaded by one `World::update` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub loaded: usize,
    pub unloaded: usize,
}

/// Owns every resident chunk, keyed by chunk coordinate.
///
/// At most one chunk exists per coordinate. Reads never load: a block in an
/// unloaded chunk reads as AIR. Writes with a valid `y` get-or-create the
/// target chunk so edits are never dropped. Inserting a chunk marks its
/// resident neighbors dirty, since their border faces were built against
/// whatever stood there before.
///
/// Not internally synchronized; one owner drives it (the world-update step).
/// Batch generation in `load_chunks` runs in parallel but inserts serially.
pub struct World {
    chunks: HashMap<ChunkCoord, Chunk>,
    terrain: TerrainGenerator,
}

impl World {
    pub fn new(terrain: TerrainGenerator) -> Self {
        Self {
            chunks: HashMap::new(),
            terrain,
        }
    }

    pub fn with_params(params: TerrainParams) -> Result<Self, TerrainError> {
        Ok(Self::new(TerrainGenerator::new(params)?))
    }

    #[inline]
    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    #[inline]
    pub const fn world_to_chunk_coord(w: i32) -> i32 {
        world_to_chunk_coord(w)
    }

    #[inline]
    pub const fn world_to_local_coord(w: i32) -> i32 {
        world_to_local_coord(w)
    }

    /// Existing chunk at `(cx, cz)`, or a freshly generated one that is stored first.
    pub fn get_chunk(&mut self, cx: i32, cz: i32) -> &mut Chunk {
        let coord = ChunkCoord::new(cx, cz);
        if !self.chunks.contains_key(&coord) {
            self.dirty_neighbors(coord);
        }
        let terrain = &self.terrain;
        self.chunks.entry(coord).or_insert_with(|| {
            log::debug!("loading chunk ({}, {})", cx, cz);
            Chunk::generated(coord, terrain)
        })
    }

    /// Eager load. Idempotent: a resident chunk is returned as is, never regenerated.
    #[inline]
    pub fn load_chunk(&mut self, cx: i32, cz: i32) -> &mut Chunk {
        self.get_chunk(cx, cz)
    }

    #[inline]
    pub fn has_chunk(&self, cx: i32, cz: i32) -> bool {
        self.chunks.contains_key(&ChunkCoord::new(cx, cz))
    }

    /// Drops the chunk at `(cx, cz)`; returns whether one was resident.
    pub fn unload_chunk(&mut self, cx: i32, cz: i32) -> bool {
        let removed = self.chunks.remove(&ChunkCoord::new(cx, cz)).is_some();
        if removed {
            log::debug!("unloaded chunk ({}, {})", cx, cz);
        }
        removed
    }

    pub fn unload_all(&mut self) {
        log::debug!("unloading all {} chunks", self.chunks.len());
        self.chunks.clear();
    }

    #[inline]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    #[inline]
    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChunkCoord, &Chunk)> + '_ {
        self.chunks.iter().map(|(c, chunk)| (*c, chunk))
    }

    /// Block at world `(x, y, z)`; AIR when the chunk is not resident or `y` is out of range.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        let coord = ChunkCoord::new(world_to_chunk_coord(x), world_to_chunk_coord(z));
        match self.chunks.get(&coord) {
            Some(chunk) => chunk.get_block(world_to_local_coord(x), y, world_to_local_coord(z)),
            None => BlockType::AIR,
        }
    }

    /// Writes through to the owning chunk, loading it if needed. An edit on a
    /// chunk border also marks the resident neighbor across that border dirty,
    /// since its boundary faces may change.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, ty: BlockType) {
        if !(0..CHUNK_SIZE_Y as i32).contains(&y) {
            return;
        }
        let (cx, cz) = (world_to_chunk_coord(x), world_to_chunk_coord(z));
        let (lx, lz) = (world_to_local_coord(x), world_to_local_coord(z));
        self.get_chunk(cx, cz).set_block(lx, y, lz, ty);

        let mut touched: [Option<ChunkCoord>; 2] = [None, None];
        if lx == 0 {
            touched[0] = Some(ChunkCoord::new(cx - 1, cz));
        } else if lx == CHUNK_SIZE - 1 {
            touched[0] = Some(ChunkCoord::new(cx + 1, cz));
        }
        if lz == 0 {
            touched[1] = Some(ChunkCoord::new(cx, cz - 1));
        } else if lz == CHUNK_SIZE - 1 {
            touched[1] = Some(ChunkCoord::new(cx, cz + 1));
        }
        for coord in touched.into_iter().flatten() {
            if let Some(nb) = self.chunks.get_mut(&coord) {
                nb.mark_dirty();
            }
        }
    }

    /// Highest non-air Y of world column `(x, z)`, if its chunk is resident.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        let coord = ChunkCoord::new(world_to_chunk_coord(x), world_to_chunk_coord(z));
        self.chunks
            .get(&coord)?
            .surface_height(world_to_local_coord(x), world_to_local_coord(z))
    }

    /// Generates every missing chunk in `coords` in parallel, then inserts
    /// them one by one. Returns how many were created.
    pub fn load_chunks(&mut self, coords: &[ChunkCoord]) -> usize {
        let mut missing: Vec<ChunkCoord> = coords
            .iter()
            .copied()
            .filter(|c| !self.chunks.contains_key(c))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        if missing.is_empty() {
            return 0;
        }
        let terrain = &self.terrain;
        let generated: Vec<Chunk> = missing
            .par_iter()
            .map(|&coord| Chunk::generated(coord, terrain))
            .collect();
        let n = generated.len();
        for chunk in generated {
            self.chunks.insert(chunk.coord(), chunk);
        }
        for &coord in &missing {
            self.dirty_neighbors(coord);
        }
        log::debug!("generated {} chunks", n);
        n
    }

    fn dirty_neighbors(&mut self, coord: ChunkCoord) {
        for nb in coord.neighbors4().into_iter().flatten() {
            if let Some(chunk) = self.chunks.get_mut(&nb) {
                chunk.mark_dirty();
            }
        }
    }

    /// Per-frame streaming hook: keeps exactly the chunks within `radius`
    /// (square ring distance, at most `MAX_STREAM_RADIUS`) of `focus` resident.
    /// Near the ends of the coordinate range the square is cut off.
    pub fn update(&mut self, focus: ChunkCoord, radius: u32) -> UpdateReport {
        let radius = stream_radius(radius);
        let r = radius as i32;
        let wanted: Vec<ChunkCoord> = (-r..=r)
            .flat_map(|dz| (-r..=r).filter_map(move |dx| focus.offset(dx, dz)))
            .collect();
        let loaded = self.load_chunks(&wanted);

        let before = self.chunks.len();
        self.chunks
            .retain(|coord, _| coord.ring_distance(focus) <= i64::from(radius));
        let unloaded = before - self.chunks.len();

        if loaded > 0 || unloaded > 0 {
            log::info!(
                "stream around ({}, {}): +{} -{} resident={}",
                focus.cx,
                focus.cz,
                loaded,
                unloaded,
                self.chunks.len()
            );
        }
        UpdateReport { loaded, unloaded }
    }
}

#[inline]
fn stream_radius(radius: u32) -> u32 {
    radius.min(MAX_STREAM_RADIUS)
}

impl Default for World {
    fn default() -> Self {
        Self::new(TerrainGenerator::default())
    }
}
