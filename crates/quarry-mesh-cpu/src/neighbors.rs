use quarry_chunk::ChunkCoord;

use crate::access::BlockAccess;

/// Which horizontal neighbors were resident when a mesh was built. Chunks
/// span the full height, so there is no vertical neighbor to track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NeighborsLoaded {
    pub neg_x: bool,
    pub pos_x: bool,
    pub neg_z: bool,
    pub pos_z: bool,
}

impl NeighborsLoaded {
    #[inline]
    pub const fn empty() -> Self {
        Self::horizontal(false, false, false, false)
    }

    #[inline]
    pub const fn all() -> Self {
        Self::horizontal(true, true, true, true)
    }

    #[inline]
    pub const fn horizontal(neg_x: bool, pos_x: bool, neg_z: bool, pos_z: bool) -> Self {
        Self {
            neg_x,
            pos_x,
            neg_z,
            pos_z,
        }
    }

    /// Asks `access` which of `coord`'s four neighbors are present. A side
    /// past the end of the coordinate range is never present.
    pub fn probe<A: BlockAccess + ?Sized>(access: &A, coord: ChunkCoord) -> Self {
        let [nx, px, nz, pz] = coord
            .neighbors4()
            .map(|nb| nb.is_some_and(|c| access.has_column(c)));
        Self::horizontal(nx, px, nz, pz)
    }

    #[inline]
    pub fn count(self) -> usize {
        [self.neg_x, self.pos_x, self.neg_z, self.pos_z]
            .into_iter()
            .filter(|&b| b)
            .count()
    }
}
