use std::time::Instant;

use quarry_blocks::{BlockRegistry, BlockType};
use quarry_chunk::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, Chunk, ChunkCoord};

use crate::access::BlockAccess;
use crate::atlas::TextureAtlas;
use crate::face::Face;
use crate::mesh_build::MeshBuild;
use crate::neighbors::NeighborsLoaded;

/// Local-space bounds of the emitted geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Aabb {
    fn around_cell(x: i32, y: i32, z: i32) -> Self {
        let min = [x as f32, y as f32, z as f32];
        Self {
            min,
            max: [min[0] + 1.0, min[1] + 1.0, min[2] + 1.0],
        }
    }

    fn union(self, o: Aabb) -> Self {
        Self {
            min: [
                self.min[0].min(o.min[0]),
                self.min[1].min(o.min[1]),
                self.min[2].min(o.min[2]),
            ],
            max: [
                self.max[0].max(o.max[0]),
                self.max[1].max(o.max[1]),
                self.max[2].max(o.max[2]),
            ],
        }
    }
}

/// CPU-side mesh of one chunk. Positions are chunk-local; add `origin` to
/// place it in the world.
#[derive(Clone, Debug)]
pub struct ChunkMesh {
    pub coord: ChunkCoord,
    pub origin: [i64; 3],
    pub face_count: usize,
    pub bbox: Option<Aabb>,
    pub neighbors: NeighborsLoaded,
    pub build: MeshBuild,
}

impl ChunkMesh {
    fn empty(coord: ChunkCoord) -> Self {
        let (x, z) = coord.origin();
        Self {
            coord,
            origin: [x, 0, z],
            face_count: 0,
            bbox: None,
            neighbors: NeighborsLoaded::empty(),
            build: MeshBuild::new(),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.build.vertex_count()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.build.index_count()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.build.index_count() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.face_count == 0
    }
}

/// World coordinates of local cell `(x, y, z)` of a chunk at `origin`.
/// `None` when the cell lies past the `i32` world range; nothing is stored there.
#[inline]
fn world_cell(ox: i64, oy: i64, oz: i64, x: i32, y: i32, z: i32) -> Option<(i32, i32, i32)> {
    Some((
        i32::try_from(ox + i64::from(x)).ok()?,
        i32::try_from(oy + i64::from(y)).ok()?,
        i32::try_from(oz + i64::from(z)).ok()?,
    ))
}

/// Meshes `chunk`, emitting a face for every non-air cell whose neighbor on
/// that side is transparent. Neighbors outside the chunk come from `access`.
pub fn build_chunk_mesh<A: BlockAccess + ?Sized>(
    chunk: &Chunk,
    access: &A,
    reg: &BlockRegistry,
    atlas: &TextureAtlas,
) -> ChunkMesh {
    let mut mesh = ChunkMesh::empty(chunk.coord());
    rebuild_chunk_mesh(&mut mesh, chunk, access, reg, atlas);
    mesh
}

/// Like [`build_chunk_mesh`] but refills `mesh` in place, reusing its buffers.
pub fn rebuild_chunk_mesh<A: BlockAccess + ?Sized>(
    mesh: &mut ChunkMesh,
    chunk: &Chunk,
    access: &A,
    reg: &BlockRegistry,
    atlas: &TextureAtlas,
) {
    let t0 = Instant::now();
    let coord = chunk.coord();
    let (ox, oy, oz) = chunk.world_origin();
    mesh.coord = coord;
    mesh.origin = [ox, oy, oz];
    mesh.neighbors = NeighborsLoaded::probe(access, coord);
    mesh.build.clear_keep_capacity();

    let cell = atlas.cell_size();
    let mut faces = 0usize;
    let mut bbox: Option<Aabb> = None;
    for y in 0..CHUNK_SIZE_Y as i32 {
        for z in 0..CHUNK_SIZE_Z as i32 {
            for x in 0..CHUNK_SIZE_X as i32 {
                let ty = chunk.get_block(x, y, z);
                if ty.is_air() {
                    continue;
                }
                let mut emitted = false;
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                    let neighbor = if Chunk::in_bounds(nx, ny, nz) {
                        chunk.get_block(nx, ny, nz)
                    } else {
                        world_cell(ox, oy, oz, nx, ny, nz)
                            .map_or(BlockType::AIR, |(wx, wy, wz)| access.block_at(wx, wy, wz))
                    };
                    if !reg.is_transparent(neighbor) {
                        continue;
                    }
                    mesh.build.add_face(
                        face,
                        [x as f32, y as f32, z as f32],
                        atlas.uv_origin(ty, face),
                        cell,
                    );
                    faces += 1;
                    emitted = true;
                }
                if emitted {
                    let b = Aabb::around_cell(x, y, z);
                    bbox = Some(bbox.map_or(b, |acc| acc.union(b)));
                }
            }
        }
    }
    mesh.face_count = faces;
    mesh.bbox = bbox;
    log::debug!(
        target: "perf",
        "ms={} mesh_build chunk=({}, {}) faces={} neighbors={}",
        t0.elapsed().as_millis(),
        coord.cx,
        coord.cz,
        faces,
        mesh.neighbors.count()
    );
}
