use std::sync::Arc;

use hashbrown::HashMap;
use quarry_blocks::{BlockRegistry, BlockType};
use quarry_chunk::ChunkCoord;
use quarry_mesh_cpu::{ChunkMesh, ChunkMeshes, TextureAtlas};
use quarry_world::World;

/// Rendering seam: receives finished meshes and retirements. A GPU backend
/// would upload on `submit` and free buffers on `retire`.
pub trait MeshSink {
    fn submit(&mut self, mesh: &ChunkMesh);
    fn retire(&mut self, coord: ChunkCoord);
}

/// Keeps per-chunk vertex/index counts instead of uploading anything.
#[derive(Default, Debug)]
pub struct HeadlessSink {
    resident: HashMap<ChunkCoord, (usize, usize)>,
    pub uploads: usize,
}

impl HeadlessSink {
    pub fn resident_chunks(&self) -> usize {
        self.resident.len()
    }

    /// Total `(vertices, indices)` currently held.
    pub fn totals(&self) -> (usize, usize) {
        self.resident
            .values()
            .fold((0, 0), |(v, i), &(dv, di)| (v + dv, i + di))
    }
}

impl MeshSink for HeadlessSink {
    fn submit(&mut self, mesh: &ChunkMesh) {
        self.resident
            .insert(mesh.coord, (mesh.vertex_count(), mesh.index_count()));
        self.uploads += 1;
    }

    fn retire(&mut self, coord: ChunkCoord) {
        self.resident.remove(&coord);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub loaded: usize,
    pub unloaded: usize,
    pub rebuilt: usize,
    pub dug: Option<(i32, i32, i32)>,
}

/// Headless game loop: streams chunks around a moving focus, digs one block
/// per frame, and keeps meshes in step.
pub struct Session {
    pub world: World,
    pub meshes: ChunkMeshes,
    reg: Arc<BlockRegistry>,
    atlas: TextureAtlas,
    radius: u32,
    focus: (i32, i32),
    step: i32,
}

impl Session {
    pub fn new(
        world: World,
        reg: Arc<BlockRegistry>,
        atlas: TextureAtlas,
        radius: u32,
        start: (i32, i32),
        step: i32,
    ) -> Self {
        Self {
            world,
            meshes: ChunkMeshes::new(),
            reg,
            atlas,
            radius,
            focus: start,
            step,
        }
    }

    #[inline]
    pub fn focus(&self) -> (i32, i32) {
        self.focus
    }

    /// Runs one frame at the current focus, then advances it by `step` along +X.
    pub fn frame(&mut self, sink: &mut impl MeshSink) -> FrameStats {
        let (fx, fz) = self.focus;
        let report = self
            .world
            .update(ChunkCoord::containing(fx, fz), self.radius);

        let dug = self.world.surface_height(fx, fz).map(|y| {
            self.world.set_block(fx, y, fz, BlockType::AIR);
            (fx, y, fz)
        });

        let rebuilt = self.meshes.update(&mut self.world, &self.reg, &self.atlas);
        for &coord in self.meshes.dropped() {
            sink.retire(coord);
        }
        for &coord in self.meshes.rebuilt() {
            if let Some(mesh) = self.meshes.get(coord) {
                sink.submit(mesh);
            }
        }

        self.focus.0 = fx.saturating_add(self.step);
        FrameStats {
            loaded: report.loaded,
            unloaded: report.unloaded,
            rebuilt,
            dug,
        }
    }
}
