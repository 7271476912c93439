use std::error::Error;
use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use quarry_blocks::BlockType;
use serde::Deserialize;

use crate::face::{Face, FaceRole};

/// `[column, row]` of a cell in the atlas grid. Rows count from the top of the image.
pub type AtlasCell = [u32; 2];

/// `[atlas]` table. Entries override the built-in mapping per block id.
#[derive(Clone, Debug, Deserialize)]
pub struct AtlasConfig {
    #[serde(default = "default_cells_per_row")]
    pub cells_per_row: u32,
    #[serde(default)]
    pub default_cell: AtlasCell,
    #[serde(default)]
    pub entries: Vec<AtlasEntry>,
}

/// Cells for one block type. `all` fills every role; `top`/`bottom`/`side` win over it.
#[derive(Clone, Debug, Deserialize)]
pub struct AtlasEntry {
    pub id: BlockType,
    #[serde(default)]
    pub all: Option<AtlasCell>,
    #[serde(default)]
    pub top: Option<AtlasCell>,
    #[serde(default)]
    pub bottom: Option<AtlasCell>,
    #[serde(default)]
    pub side: Option<AtlasCell>,
}

fn default_cells_per_row() -> u32 {
    16
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            cells_per_row: default_cells_per_row(),
            default_cell: [0, 0],
            entries: Vec::new(),
        }
    }
}

/// Square texture atlas split into `cells_per_row`² equal cells.
#[derive(Clone, Debug)]
pub struct TextureAtlas {
    cells_per_row: u32,
    cell_size: f32,
    default_cell: AtlasCell,
    // [top, bottom, side]
    cells: HashMap<BlockType, [AtlasCell; 3]>,
}

impl TextureAtlas {
    /// 16x16 grid with grass, stone, and dirt in the first three cells.
    pub fn builtin() -> Self {
        let mut cells = HashMap::new();
        cells.insert(BlockType::GRASS_BLOCK, [[0, 0]; 3]);
        cells.insert(BlockType::STONE, [[1, 0]; 3]);
        cells.insert(BlockType::DIRT, [[2, 0]; 3]);
        Self {
            cells_per_row: 16,
            cell_size: 1.0 / 16.0,
            default_cell: [0, 0],
            cells,
        }
    }

    pub fn from_config(cfg: &AtlasConfig) -> Result<Self, Box<dyn Error>> {
        if cfg.cells_per_row == 0 {
            return Err("atlas.cells_per_row must be positive".into());
        }
        let n = cfg.cells_per_row;
        let check = |cell: AtlasCell| -> Result<AtlasCell, Box<dyn Error>> {
            if cell[0] >= n || cell[1] >= n {
                return Err(format!("atlas cell {:?} outside a {}x{} grid", cell, n, n).into());
            }
            Ok(cell)
        };
        let mut atlas = Self::builtin();
        atlas.cells_per_row = n;
        atlas.cell_size = 1.0 / n as f32;
        atlas.default_cell = check(cfg.default_cell)?;
        atlas.cells.retain(|_, c| c.iter().flatten().all(|&v| v < n));
        for e in &cfg.entries {
            let base = match e.all {
                Some(c) => [check(c)?; 3],
                None => atlas.cells.get(&e.id).copied().unwrap_or([atlas.default_cell; 3]),
            };
            let top = e.top.map(check).transpose()?.unwrap_or(base[0]);
            let bottom = e.bottom.map(check).transpose()?.unwrap_or(base[1]);
            let side = e.side.map(check).transpose()?.unwrap_or(base[2]);
            atlas.cells.insert(e.id, [top, bottom, side]);
        }
        Ok(atlas)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: AtlasConfig = toml::from_str(toml_str)?;
        Self::from_config(&cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    #[inline]
    pub fn cells_per_row(&self) -> u32 {
        self.cells_per_row
    }

    /// Width and height of one cell in UV units.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Grid cell for `ty` on `face`; unmapped types use the default cell.
    pub fn cell(&self, ty: BlockType, face: Face) -> AtlasCell {
        match self.cells.get(&ty) {
            Some(c) => match face.role() {
                FaceRole::Top => c[0],
                FaceRole::Bottom => c[1],
                FaceRole::Side => c[2],
            },
            None => self.default_cell,
        }
    }

    /// UV of the cell's top-left corner.
    #[inline]
    pub fn uv_origin(&self, ty: BlockType, face: Face) -> [f32; 2] {
        let [col, row] = self.cell(ty, face);
        [col as f32 * self.cell_size, row as f32 * self.cell_size]
    }
}

impl Default for TextureAtlas {
    fn default() -> Self {
        Self::builtin()
    }
}
