use quarry_blocks::{BlockRegistry, BlockType};
use quarry_chunk::ChunkCoord;
use quarry_mesh_cpu::{ChunkMeshes, TextureAtlas};
use quarry_world::World;

fn setup() -> (World, ChunkMeshes, BlockRegistry, TextureAtlas) {
    let mut world = World::default();
    world.update(ChunkCoord::new(0, 0), 1);
    (world, ChunkMeshes::new(), BlockRegistry::builtin(), TextureAtlas::builtin())
}

#[test]
fn first_update_builds_everything_then_settles() {
    let (mut world, mut meshes, reg, atlas) = setup();
    assert_eq!(meshes.update(&mut world, &reg, &atlas), 9);
    assert_eq!(meshes.len(), 9);
    assert!(world.iter().all(|(_, c)| !c.is_dirty()));
    assert_eq!(meshes.update(&mut world, &reg, &atlas), 0);
}

#[test]
fn interior_edit_rebuilds_one_chunk() {
    let (mut world, mut meshes, reg, atlas) = setup();
    meshes.update(&mut world, &reg, &atlas);
    let before = meshes.get(ChunkCoord::new(0, 0)).unwrap().face_count;
    // A floating block well above the surface adds exactly its six faces.
    let h = world.surface_height(7, 7).unwrap();
    world.set_block(7, h + 5, 7, BlockType::OBSIDIAN);
    assert_eq!(meshes.update(&mut world, &reg, &atlas), 1);
    let after = meshes.get(ChunkCoord::new(0, 0)).unwrap().face_count;
    assert_eq!(after, before + 6);
}

#[test]
fn border_edit_rebuilds_both_sides() {
    let (mut world, mut meshes, reg, atlas) = setup();
    meshes.update(&mut world, &reg, &atlas);
    let h = world.surface_height(15, 7).unwrap();
    world.set_block(15, h + 1, 7, BlockType::COBBLESTONE);
    assert_eq!(meshes.update(&mut world, &reg, &atlas), 2);
}

#[test]
fn streaming_drops_and_refreshes_meshes() {
    let (mut world, mut meshes, reg, atlas) = setup();
    meshes.update(&mut world, &reg, &atlas);

    world.update(ChunkCoord::new(1, 0), 1);
    // 3 new chunks at x = 2, 3 at x = 1 gain a +X neighbor, 3 at x = 0 lose their -X neighbor
    assert_eq!(meshes.update(&mut world, &reg, &atlas), 9);
    assert_eq!(meshes.len(), 9);
    assert!(!meshes.is_built(ChunkCoord::new(-1, 0)));
    assert!(meshes.is_built(ChunkCoord::new(2, 1)));
    assert_eq!(meshes.update(&mut world, &reg, &atlas), 0);
}

#[test]
fn unloading_everything_empties_the_cache() {
    let (mut world, mut meshes, reg, atlas) = setup();
    meshes.update(&mut world, &reg, &atlas);
    world.unload_all();
    assert_eq!(meshes.update(&mut world, &reg, &atlas), 0);
    assert!(meshes.is_empty());
}

#[test]
fn reloaded_neighbor_refreshes_the_seam() {
    let (mut world, mut meshes, reg, atlas) = setup();
    meshes.update(&mut world, &reg, &atlas);
    let original = meshes.get(ChunkCoord::new(0, 0)).unwrap().face_count;

    // Carve a border cell of (1, 0) so (0, 0)'s seam is rebuilt against the hole.
    let y = world.surface_height(16, 7).unwrap().min(world.surface_height(15, 7).unwrap());
    world.set_block(16, y, 7, BlockType::AIR);
    meshes.update(&mut world, &reg, &atlas);

    // Regenerating (1, 0) between updates fills the hole again; the mask of
    // (0, 0) is unchanged, yet its seam must follow the new contents.
    world.unload_chunk(1, 0);
    world.load_chunk(1, 0);
    meshes.update(&mut world, &reg, &atlas);
    assert!(meshes.rebuilt().contains(&ChunkCoord::new(0, 0)));
    assert!(meshes.rebuilt().contains(&ChunkCoord::new(1, 0)));
    assert_eq!(meshes.get(ChunkCoord::new(0, 0)).unwrap().face_count, original);
}

#[test]
fn chunks_at_the_key_range_edges_are_cached() {
    let mut world = World::default();
    let mut meshes = ChunkMeshes::new();
    let reg = BlockRegistry::builtin();
    let atlas = TextureAtlas::builtin();
    world.load_chunk(i32::MAX, 0);
    world.load_chunk(i32::MIN, i32::MAX);
    world.load_chunk(200_000_000, 0);
    assert_eq!(meshes.update(&mut world, &reg, &atlas), 3);
    assert_eq!(meshes.update(&mut world, &reg, &atlas), 0);

    world.update(ChunkCoord::new(i32::MAX, i32::MAX), 1);
    assert_eq!(meshes.update(&mut world, &reg, &atlas), 4);
    assert_eq!(meshes.dropped().len(), 3);
    assert_eq!(meshes.len(), 4);
}
