use crate::face::Face;

/// Floats per vertex: position (3), texcoord (2), normal (3).
pub const FLOATS_PER_VERTEX: usize = 8;
pub const VERTICES_PER_QUAD: usize = 4;
pub const INDICES_PER_QUAD: usize = 6;

// Per-corner UV inside one cell; corners 0 and 1 sit on the bottom edge.
const CORNER_UV: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Interleaved vertex buffer plus triangle indices, ready to hand to a renderer.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    vertices: Vec<f32>,
    indices: Vec<u32>,
}

impl MeshBuild {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all arrays but retains capacity for reuse across rebuilds.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.vertices
            .reserve(n_quads * VERTICES_PER_QUAD * FLOATS_PER_VERTEX);
        self.indices.reserve(n_quads * INDICES_PER_QUAD);
    }

    /// Appends the `face` quad of the unit cube at `origin`, textured with the
    /// atlas cell whose top-left UV is `uv0` and whose edge is `cell` UV units.
    pub fn add_face(&mut self, face: Face, origin: [f32; 3], uv0: [f32; 2], cell: f32) {
        let base = self.vertex_count() as u32;
        let n = face.normal();
        for (corner, uv) in face.corners().iter().zip(CORNER_UV) {
            self.vertices.extend_from_slice(&[
                origin[0] + corner[0],
                origin[1] + corner[1],
                origin[2] + corner[2],
                uv0[0] + uv[0] * cell,
                uv0[1] + uv[1] * cell,
                n[0],
                n[1],
                n[2],
            ]);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Interleaved `[px, py, pz, u, v, nx, ny, nz]` per vertex.
    #[inline]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The vertex at `i` split into position, texcoord, and normal.
    pub fn vertex(&self, i: usize) -> Option<([f32; 3], [f32; 2], [f32; 3])> {
        let v = self
            .vertices
            .get(i * FLOATS_PER_VERTEX..(i + 1) * FLOATS_PER_VERTEX)?;
        Some(([v[0], v[1], v[2]], [v[3], v[4]], [v[5], v[6], v[7]]))
    }
}
