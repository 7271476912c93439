use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::BlocksConfig;
use super::types::{BUILTIN, Block, BlockType};

/// Properties resolved for one block type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockProps {
    pub name: String,
    pub solid: bool,
    pub liquid: bool,
    pub transparent: bool,
}

/// Name reported for any id without an entry.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Per-type property table.
///
/// Built once (from the built-in table plus optional config overrides) and
/// never mutated afterwards, so it can be shared across threads behind an
/// `Arc` or a plain reference. Every query is total: ids without an entry
/// resolve to not-solid, not-liquid, opaque, named "Unknown".
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    // Dense by id; `None` marks gaps between registered ids.
    blocks: Vec<Option<BlockProps>>,
    by_name: HashMap<String, BlockType>,
}

impl BlockRegistry {
    /// Registry containing exactly the built-in block types.
    pub fn builtin() -> Self {
        let mut reg = BlockRegistry {
            blocks: Vec::with_capacity(BUILTIN.len()),
            by_name: HashMap::with_capacity(BUILTIN.len()),
        };
        for &(ty, name) in BUILTIN {
            reg.insert(ty, builtin_props(ty, name));
        }
        reg
    }

    /// Built-in table with `cfg` overrides applied, in file order. Ids not in
    /// the built-in table are added as opaque solids unless the override says
    /// otherwise. Names stay unique: giving an id a name another id currently
    /// holds is an error. A new id without a name is registered as "Unknown"
    /// and cannot be looked up by name.
    pub fn from_config(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = Self::builtin();
        for def in cfg.blocks {
            let ty = BlockType::new(def.id);
            let base = reg.entry(ty).cloned().unwrap_or_else(|| BlockProps {
                name: UNKNOWN_NAME.to_string(),
                solid: true,
                liquid: false,
                transparent: false,
            });
            let props = BlockProps {
                name: def.name.unwrap_or(base.name),
                solid: def.solid.unwrap_or(base.solid),
                liquid: def.liquid.unwrap_or(base.liquid),
                transparent: def.transparent.unwrap_or(base.transparent),
            };
            match reg.id_by_name(&props.name) {
                Some(owner) if owner != ty => {
                    return Err(format!(
                        "block id {}: name {:?} already belongs to id {}",
                        def.id,
                        props.name,
                        owner.raw()
                    )
                    .into());
                }
                _ => reg.insert(ty, props),
            }
        }
        Ok(reg)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    fn insert(&mut self, ty: BlockType, props: BlockProps) {
        let ix = ty.raw() as usize;
        if self.blocks.len() <= ix {
            self.blocks.resize(ix + 1, None);
        }
        if let Some(old) = self.blocks[ix].take() {
            if self.by_name.get(&old.name) == Some(&ty) {
                self.by_name.remove(&old.name);
            }
        }
        if props.name != UNKNOWN_NAME {
            self.by_name.insert(props.name.clone(), ty);
        }
        self.blocks[ix] = Some(props);
    }

    /// Registered properties for `ty`, if any.
    #[inline]
    pub fn entry(&self, ty: BlockType) -> Option<&BlockProps> {
        self.blocks.get(ty.raw() as usize).and_then(Option::as_ref)
    }

    #[inline]
    pub fn is_registered(&self, ty: BlockType) -> bool {
        self.entry(ty).is_some()
    }

    #[inline]
    pub fn is_solid(&self, ty: BlockType) -> bool {
        self.entry(ty).is_some_and(|p| p.solid)
    }

    #[inline]
    pub fn is_liquid(&self, ty: BlockType) -> bool {
        self.entry(ty).is_some_and(|p| p.liquid)
    }

    #[inline]
    pub fn is_transparent(&self, ty: BlockType) -> bool {
        self.entry(ty).is_some_and(|p| p.transparent)
    }

    #[inline]
    pub fn get_name(&self, ty: BlockType) -> &str {
        self.entry(ty).map_or(UNKNOWN_NAME, |p| p.name.as_str())
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockType> {
        self.by_name.get(name).copied()
    }

    /// Registered types in id order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockType, &BlockProps)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (BlockType::new(i as u16), p)))
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.blocks.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Option::is_none)
    }

    // Block-value conveniences; light level never affects these.

    #[inline]
    pub fn block_is_solid(&self, b: Block) -> bool {
        self.is_solid(b.ty)
    }

    #[inline]
    pub fn block_is_liquid(&self, b: Block) -> bool {
        self.is_liquid(b.ty)
    }

    #[inline]
    pub fn block_is_transparent(&self, b: Block) -> bool {
        self.is_transparent(b.ty)
    }

    #[inline]
    pub fn block_name(&self, b: Block) -> &str {
        self.get_name(b.ty)
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_props(ty: BlockType, name: &str) -> BlockProps {
    let (solid, liquid, transparent) = match ty {
        BlockType::AIR => (false, false, true),
        BlockType::WATER | BlockType::LAVA => (false, true, true),
        // Foliage, ice and thin fixtures: collide but let neighbors show through.
        BlockType::GRASS
        | BlockType::TALL_GRASS
        | BlockType::OAK_LEAVES
        | BlockType::BIRCH_LEAVES
        | BlockType::SPRUCE_LEAVES
        | BlockType::JUNGLE_LEAVES
        | BlockType::ACACIA_LEAVES
        | BlockType::DARK_OAK_LEAVES
        | BlockType::ICE
        | BlockType::LADDER
        | BlockType::FENCE
        | BlockType::FENCE_GATE
        | BlockType::DOOR
        | BlockType::PRESSURE_PLATE
        | BlockType::BUTTON
        | BlockType::LEVER => (true, false, true),
        _ => (true, false, false),
    };
    BlockProps {
        name: name.to_string(),
        solid,
        liquid,
        transparent,
    }
}
