use proptest::prelude::*;
use quarry_blocks::BlockType;
use quarry_chunk::{
    CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, CHUNK_VOLUME, Chunk, ChunkCoord, TerrainGenerator,
    TerrainParams,
};

fn in_bounds() -> impl Strategy<Value = (i32, i32, i32)> {
    (
        0..CHUNK_SIZE_X as i32,
        0..CHUNK_SIZE_Y as i32,
        0..CHUNK_SIZE_Z as i32,
    )
}

fn out_of_bounds() -> impl Strategy<Value = (i32, i32, i32)> {
    (any::<i32>(), any::<i32>(), any::<i32>())
        .prop_filter("outside grid", |&(x, y, z)| !Chunk::in_bounds(x, y, z))
}

fn chunk_coord() -> impl Strategy<Value = ChunkCoord> {
    (-100_000i32..=100_000, -100_000i32..=100_000).prop_map(ChunkCoord::from)
}

#[test]
fn index_is_a_bijection() {
    let mut seen = vec![false; CHUNK_VOLUME];
    for y in 0..CHUNK_SIZE_Y as i32 {
        for z in 0..CHUNK_SIZE_Z as i32 {
            for x in 0..CHUNK_SIZE_X as i32 {
                let i = Chunk::index(x, y, z).unwrap();
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
    }
    assert!(seen.into_iter().all(|b| b));
}

#[test]
fn partial_terrain_table_uses_defaults() {
    let params: TerrainParams = toml::from_str("soil_depth = 5\n[layers]\nsurface = 40\n").unwrap();
    assert_eq!(params.soil_depth, 5);
    assert_eq!(params.layers.surface, BlockType::SAND);
    assert_eq!(params.layers.stone, BlockType::STONE);
    assert_eq!(params.waves, TerrainParams::default().waves);
    let terrain = TerrainGenerator::new(params).unwrap();
    let c = Chunk::generated(ChunkCoord::new(2, 2), &terrain);
    let h = c.surface_height(0, 0).unwrap();
    assert_eq!(c.get_block(0, h, 0), BlockType::SAND);
    assert_eq!(c.get_block(0, h - 5, 0), BlockType::DIRT);
    assert_eq!(c.get_block(0, h - 6, 0), BlockType::STONE);
}

proptest! {
    // In-bounds writes read back and set the dirty flag; mark_clean clears it
    #[test]
    fn write_read_roundtrip((x, y, z) in in_bounds(), raw in any::<u16>()) {
        let ty = BlockType::new(raw);
        let mut c = Chunk::new(ChunkCoord::default());
        prop_assert!(!c.is_dirty());
        c.set_block(x, y, z, ty);
        prop_assert_eq!(c.get_block(x, y, z), ty);
        prop_assert!(c.is_dirty());
        c.mark_clean();
        prop_assert!(!c.is_dirty());
        prop_assert_eq!(c.get_block(x, y, z), ty);
    }

    // Out-of-bounds reads are AIR and writes neither change storage nor the dirty flag
    #[test]
    fn out_of_bounds_is_inert((x, y, z) in out_of_bounds(), raw in 1u16..=u16::MAX) {
        let mut c = Chunk::new(ChunkCoord::default());
        c.fill(BlockType::STONE);
        c.mark_clean();
        let before = c.blocks().to_vec();
        prop_assert_eq!(c.get_block(x, y, z), BlockType::AIR);
        c.set_block(x, y, z, BlockType::new(raw));
        prop_assert!(!c.is_dirty());
        prop_assert_eq!(c.blocks(), &before[..]);
    }

    // A write only touches its own cell
    #[test]
    fn write_is_local((x, y, z) in in_bounds(), (ox, oy, oz) in in_bounds()) {
        prop_assume!((x, y, z) != (ox, oy, oz));
        let mut c = Chunk::new(ChunkCoord::default());
        c.set_block(x, y, z, BlockType::BRICKS);
        prop_assert_eq!(c.get_block(ox, oy, oz), BlockType::AIR);
    }

    // Generation is a pure function of the chunk coordinate
    #[test]
    fn generate_is_deterministic(coord in chunk_coord()) {
        let terrain = TerrainGenerator::default();
        let mut a = Chunk::new(coord);
        a.generate(&terrain);
        let first = a.blocks().to_vec();
        a.set_block(0, 100, 0, BlockType::GOLD_ORE);
        a.generate(&terrain);
        prop_assert_eq!(a.blocks(), &first[..]);
        let b = Chunk::generated(coord, &terrain);
        prop_assert_eq!(b.blocks(), &first[..]);
        prop_assert!(b.is_dirty());
    }

    // Columns are stone, then soil, then a single surface cell, then air
    #[test]
    fn generated_columns_are_layered(coord in chunk_coord(), x in 0i32..16, z in 0i32..16) {
        let terrain = TerrainGenerator::default();
        let c = Chunk::generated(coord, &terrain);
        let h = c.surface_height(x, z).unwrap();
        for y in 0..CHUNK_SIZE_Y as i32 {
            let expect = if y < h - 3 {
                BlockType::STONE
            } else if y < h {
                BlockType::DIRT
            } else if y == h {
                BlockType::GRASS_BLOCK
            } else {
                BlockType::AIR
            };
            prop_assert_eq!(c.get_block(x, y, z), expect);
        }
    }
}
