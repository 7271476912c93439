use quarry_blocks::BlockType;
use quarry_chunk::ChunkCoord;
use quarry_world::World;

/// World-coordinate block lookup the mesher uses for cells outside the chunk
/// being meshed. Must be total: any `(x, y, z)` yields a block type.
pub trait BlockAccess {
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType;

    /// Whether the chunk column at `coord` is present. Drives mesh
    /// invalidation when neighbors arrive or leave.
    fn has_column(&self, coord: ChunkCoord) -> bool;
}

/// Resident chunks answer; unloaded chunks and cells outside `0..256` read as AIR.
impl BlockAccess for World {
    #[inline]
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.get_block(x, y, z)
    }

    #[inline]
    fn has_column(&self, coord: ChunkCoord) -> bool {
        self.has_chunk(coord.cx, coord.cz)
    }
}

/// Treats everything outside the chunk as air; meshing a chunk on its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyNeighbors;

impl BlockAccess for EmptyNeighbors {
    #[inline]
    fn block_at(&self, _x: i32, _y: i32, _z: i32) -> BlockType {
        BlockType::AIR
    }

    #[inline]
    fn has_column(&self, _coord: ChunkCoord) -> bool {
        false
    }
}
