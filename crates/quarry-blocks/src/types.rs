use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::registry::BlockRegistry;

/// Numeric block-type identifier.
///
/// Chunks store these verbatim, including ids this build does not know about;
/// the registry resolves properties at read time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockType(pub u16);

macro_rules! block_types {
    ($($name:ident = $id:literal => $label:literal,)*) => {
        impl BlockType {
            $(pub const $name: BlockType = BlockType($id);)*
        }

        /// Every built-in type with its display name, in id order.
        pub(crate) const BUILTIN: &[(BlockType, &str)] = &[
            $((BlockType::$name, $label),)*
        ];
    };
}

block_types! {
    AIR = 0 => "Air",
    BEDROCK = 1 => "Bedrock",
    STONE = 2 => "Stone",
    COBBLESTONE = 3 => "Cobblestone",
    STONE_BRICKS = 4 => "Stone Bricks",
    MOSSY_STONE_BRICKS = 5 => "Mossy Stone Bricks",
    CRACKED_STONE_BRICKS = 6 => "Cracked Stone Bricks",
    CHISELED_STONE_BRICKS = 7 => "Chiseled Stone Bricks",
    POLISHED_ANDESITE = 8 => "Polished Andesite",
    POLISHED_DIORITE = 9 => "Polished Diorite",
    POLISHED_GRANITE = 10 => "Polished Granite",
    DIRT = 11 => "Dirt",
    GRASS_BLOCK = 12 => "Grass Block",
    GRASS = 13 => "Grass",
    TALL_GRASS = 14 => "Tall Grass",
    OAK_LOG = 15 => "Oak Log",
    BIRCH_LOG = 16 => "Birch Log",
    SPRUCE_LOG = 17 => "Spruce Log",
    JUNGLE_LOG = 18 => "Jungle Log",
    ACACIA_LOG = 19 => "Acacia Log",
    DARK_OAK_LOG = 20 => "Dark Oak Log",
    OAK_LEAVES = 21 => "Oak Leaves",
    BIRCH_LEAVES = 22 => "Birch Leaves",
    SPRUCE_LEAVES = 23 => "Spruce Leaves",
    JUNGLE_LEAVES = 24 => "Jungle Leaves",
    ACACIA_LEAVES = 25 => "Acacia Leaves",
    DARK_OAK_LEAVES = 26 => "Dark Oak Leaves",
    OAK_PLANKS = 27 => "Oak Planks",
    BIRCH_PLANKS = 28 => "Birch Planks",
    SPRUCE_PLANKS = 29 => "Spruce Planks",
    JUNGLE_PLANKS = 30 => "Jungle Planks",
    ACACIA_PLANKS = 31 => "Acacia Planks",
    DARK_OAK_PLANKS = 32 => "Dark Oak Planks",
    COAL_ORE = 33 => "Coal Ore",
    IRON_ORE = 34 => "Iron Ore",
    GOLD_ORE = 35 => "Gold Ore",
    DIAMOND_ORE = 36 => "Diamond Ore",
    EMERALD_ORE = 37 => "Emerald Ore",
    LAPIS_ORE = 38 => "Lapis Ore",
    REDSTONE_ORE = 39 => "Redstone Ore",
    SAND = 40 => "Sand",
    RED_SAND = 41 => "Red Sand",
    GRAVEL = 42 => "Gravel",
    WATER = 43 => "Water",
    LAVA = 44 => "Lava",
    SNOW = 45 => "Snow",
    ICE = 46 => "Ice",
    PACKED_ICE = 47 => "Packed Ice",
    OBSIDIAN = 48 => "Obsidian",
    BOOKSHELF = 49 => "Bookshelf",
    MOSS_BLOCK = 50 => "Moss Block",
    CLAY = 51 => "Clay",
    SAND_STONE = 52 => "Sandstone",
    BRICKS = 53 => "Bricks",
    CRAFTING_TABLE = 54 => "Crafting Table",
    FURNACE = 55 => "Furnace",
    CHEST = 56 => "Chest",
    LADDER = 57 => "Ladder",
    FENCE = 58 => "Fence",
    FENCE_GATE = 59 => "Fence Gate",
    DOOR = 60 => "Door",
    PRESSURE_PLATE = 61 => "Pressure Plate",
    BUTTON = 62 => "Button",
    LEVER = 63 => "Lever",
}

impl BlockType {
    /// Reserved marker for identifiers that could not be decoded.
    pub const UNKNOWN: BlockType = BlockType(u16::MAX);

    /// Highest id with a built-in definition.
    pub const LAST_BUILTIN: BlockType = BlockType::LEVER;

    /// Wraps a raw id without validation.
    #[inline]
    pub const fn new(raw: u16) -> Self {
        BlockType(raw)
    }

    /// Decodes a raw id, mapping anything past the built-in range to `UNKNOWN`.
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        if raw <= Self::LAST_BUILTIN.0 {
            BlockType(raw)
        } else {
            Self::UNKNOWN
        }
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == Self::AIR.0
    }

    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 <= Self::LAST_BUILTIN.0
    }
}

impl From<u16> for BlockType {
    fn from(raw: u16) -> Self {
        BlockType(raw)
    }
}

impl From<BlockType> for u16 {
    fn from(ty: BlockType) -> Self {
        ty.0
    }
}

/// Brightest light level a block can carry.
pub const MAX_LIGHT: u8 = 15;

/// A placed block: type, type-specific metadata, and a transient light level.
///
/// Equality and hashing only consider `(ty, metadata)`.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Block {
    pub ty: BlockType,
    /// Orientation and similar per-type state; never interpreted by the core.
    pub metadata: u8,
    light_level: u8,
}

impl Block {
    pub const AIR: Block = Block {
        ty: BlockType::AIR,
        metadata: 0,
        light_level: 0,
    };

    #[inline]
    pub const fn new(ty: BlockType) -> Self {
        Block {
            ty,
            metadata: 0,
            light_level: 0,
        }
    }

    #[inline]
    pub const fn with_metadata(ty: BlockType, metadata: u8) -> Self {
        Block {
            ty,
            metadata,
            light_level: 0,
        }
    }

    #[inline]
    pub fn with_light(mut self, level: u8) -> Self {
        self.set_light_level(level);
        self
    }

    #[inline]
    pub fn light_level(&self) -> u8 {
        self.light_level
    }

    /// Stores `level`, clamped to `MAX_LIGHT`.
    #[inline]
    pub fn set_light_level(&mut self, level: u8) {
        self.light_level = level.min(MAX_LIGHT);
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        self.ty.is_air()
    }

    #[inline]
    pub fn is_solid(&self, reg: &BlockRegistry) -> bool {
        reg.block_is_solid(*self)
    }

    #[inline]
    pub fn is_liquid(&self, reg: &BlockRegistry) -> bool {
        reg.block_is_liquid(*self)
    }

    #[inline]
    pub fn is_transparent(&self, reg: &BlockRegistry) -> bool {
        reg.block_is_transparent(*self)
    }

    #[inline]
    pub fn name<'r>(&self, reg: &'r BlockRegistry) -> &'r str {
        reg.block_name(*self)
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.metadata == other.metadata
    }
}

impl Eq for Block {}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
        self.metadata.hash(state);
    }
}

impl From<BlockType> for Block {
    fn from(ty: BlockType) -> Self {
        Block::new(ty)
    }
}
