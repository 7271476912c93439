use serde::{Deserialize, Serialize};

use crate::CHUNK_SIZE;

/// Chunk column position. Both axes are full-width signed integers, so the
/// pair is usable directly as a collision-free map key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// The chunk containing world column `(wx, wz)`.
    #[inline]
    pub const fn containing(wx: i32, wz: i32) -> Self {
        Self {
            cx: wx.div_euclid(CHUNK_SIZE),
            cz: wz.div_euclid(CHUNK_SIZE),
        }
    }

    /// `self` shifted by `(dx, dz)`, or `None` past either end of the `i32` range.
    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Option<Self> {
        Some(Self {
            cx: self.cx.checked_add(dx)?,
            cz: self.cz.checked_add(dz)?,
        })
    }

    /// World-space X/Z of the chunk's (0, 0) column. Chunks near the ends of
    /// the key range start outside `i32`, hence the wider type.
    #[inline]
    pub const fn origin(self) -> (i64, i64) {
        (
            self.cx as i64 * CHUNK_SIZE as i64,
            self.cz as i64 * CHUNK_SIZE as i64,
        )
    }

    /// The four horizontally adjacent chunks: -X, +X, -Z, +Z. A side past the
    /// end of the key range is `None`.
    #[inline]
    pub fn neighbors4(self) -> [Option<ChunkCoord>; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx) - i64::from(other.cx);
        let dz = i64::from(self.cz) - i64::from(other.cz);
        dx * dx + dz * dz
    }

    /// Chebyshev distance; the streaming radius is a square.
    #[inline]
    pub fn ring_distance(self, other: ChunkCoord) -> i64 {
        let dx = (i64::from(self.cx) - i64::from(other.cx)).abs();
        let dz = (i64::from(self.cz) - i64::from(other.cz)).abs();
        dx.max(dz)
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}
