use quarry_chunk::CHUNK_SIZE;

/// Chunk index containing world coordinate `w` (floor division).
#[inline]
pub const fn world_to_chunk_coord(w: i32) -> i32 {
    w.div_euclid(CHUNK_SIZE)
}

/// Offset of `w` inside its chunk, always in `[0, CHUNK_SIZE)`.
#[inline]
pub const fn world_to_local_coord(w: i32) -> i32 {
    w.rem_euclid(CHUNK_SIZE)
}
