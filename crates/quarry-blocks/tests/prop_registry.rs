use proptest::prelude::*;
use quarry_blocks::registry::UNKNOWN_NAME;
use quarry_blocks::{Block, BlockRegistry, BlockType, MAX_LIGHT};

#[test]
fn documented_builtin_properties() {
    let reg = BlockRegistry::builtin();
    assert!(!reg.is_solid(BlockType::AIR));
    assert!(!reg.is_solid(BlockType::WATER));
    assert!(reg.is_liquid(BlockType::WATER));
    assert!(reg.is_liquid(BlockType::LAVA));
    assert!(reg.is_solid(BlockType::STONE));
    assert!(!reg.is_transparent(BlockType::STONE));
}

#[test]
fn every_builtin_id_is_registered() {
    let reg = BlockRegistry::builtin();
    for raw in 0..=BlockType::LAST_BUILTIN.raw() {
        let ty = BlockType::new(raw);
        assert!(reg.is_registered(ty), "id {raw} missing");
        assert_ne!(reg.get_name(ty), UNKNOWN_NAME);
    }
    let ids: Vec<u16> = reg.iter().map(|(ty, _)| ty.raw()).collect();
    assert_eq!(ids, (0..=BlockType::LAST_BUILTIN.raw()).collect::<Vec<_>>());
}

proptest! {
    // Ids past the built-in range resolve to safe defaults without failing
    #[test]
    fn unknown_ids_get_safe_defaults(raw in (BlockType::LAST_BUILTIN.raw() + 1)..=u16::MAX) {
        let reg = BlockRegistry::builtin();
        let ty = BlockType::new(raw);
        prop_assert!(!reg.is_solid(ty));
        prop_assert!(!reg.is_liquid(ty));
        prop_assert!(!reg.is_transparent(ty));
        prop_assert_eq!(reg.get_name(ty), UNKNOWN_NAME);
        prop_assert_eq!(BlockType::from_raw(raw), BlockType::UNKNOWN);
    }

    // Liquids are never solid, and anything non-solid in the built-in table is see-through
    #[test]
    fn builtin_flags_are_consistent(raw in 0u16..=BlockType::LAST_BUILTIN.raw()) {
        let reg = BlockRegistry::builtin();
        let ty = BlockType::new(raw);
        if reg.is_liquid(ty) {
            prop_assert!(!reg.is_solid(ty));
        }
        if !reg.is_solid(ty) {
            prop_assert!(reg.is_transparent(ty));
        }
        prop_assert_eq!(BlockType::from_raw(raw), ty);
    }

    // Block equality ignores light and the light level never exceeds MAX_LIGHT
    #[test]
    fn block_light_is_transient(raw in any::<u16>(), meta in any::<u8>(), l1 in any::<u8>(), l2 in any::<u8>()) {
        let a = Block::with_metadata(BlockType::new(raw), meta).with_light(l1);
        let b = Block::with_metadata(BlockType::new(raw), meta).with_light(l2);
        prop_assert_eq!(a, b);
        prop_assert!(a.light_level() <= MAX_LIGHT);
        prop_assert_eq!(a.light_level(), l1.min(MAX_LIGHT));
    }

    // Block-level queries agree with type-level queries
    #[test]
    fn block_queries_delegate_to_type(raw in any::<u16>(), meta in any::<u8>()) {
        let reg = BlockRegistry::builtin();
        let b = Block::with_metadata(BlockType::new(raw), meta);
        prop_assert_eq!(reg.block_is_solid(b), reg.is_solid(b.ty));
        prop_assert_eq!(reg.block_is_liquid(b), reg.is_liquid(b.ty));
        prop_assert_eq!(reg.block_is_transparent(b), reg.is_transparent(b.ty));
        prop_assert_eq!(reg.block_name(b), reg.get_name(b.ty));
        prop_assert_eq!(b.is_solid(&reg), reg.is_solid(b.ty));
        prop_assert_eq!(b.is_transparent(&reg), reg.is_transparent(b.ty));
        prop_assert_eq!(b.name(&reg), reg.get_name(b.ty));
    }
}
