use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use quarry_chunk::TerrainParams;
use quarry_mesh_cpu::AtlasConfig;
use serde::Deserialize;

/// Top-level TOML config. Every table is optional.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuarryConfig {
    /// Path of a `[[blocks]]` override file, relative to this config file.
    #[serde(default)]
    pub blocks: Option<PathBuf>,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub terrain: TerrainParams,
    #[serde(default)]
    pub atlas: AtlasConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    /// Square streaming radius in chunks around the focus.
    #[serde(default = "default_view_radius")]
    pub view_radius: u32,
}

fn default_view_radius() -> u32 {
    4
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            view_radius: default_view_radius(),
        }
    }
}

impl QuarryConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Loads `path` and resolves a relative `blocks` path against its directory.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| format!("reading {}: {}", path.display(), e))?;
        let mut cfg = Self::from_toml_str(&s)?;
        if let (Some(blocks), Some(dir)) = (cfg.blocks.as_mut(), path.parent()) {
            if blocks.is_relative() {
                *blocks = dir.join(&*blocks);
            }
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_blocks::BlockType;

    #[test]
    fn empty_config_is_all_defaults() {
        let cfg = QuarryConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.world.view_radius, 4);
        assert_eq!(cfg.terrain, TerrainParams::default());
        assert_eq!(cfg.atlas.cells_per_row, 16);
        assert!(cfg.blocks.is_none());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let cfg = QuarryConfig::from_toml_str(
            r#"
            blocks = "blocks.toml"

            [world]
            view_radius = 2

            [terrain]
            base_height = 64.0

            [terrain.layers]
            surface = 40

            [atlas]
            cells_per_row = 8
            "#,
        )
        .unwrap();
        assert_eq!(cfg.world.view_radius, 2);
        assert_eq!(cfg.terrain.base_height, 64.0);
        assert_eq!(cfg.terrain.soil_depth, 3);
        assert_eq!(cfg.terrain.layers.surface, BlockType::SAND);
        assert_eq!(cfg.atlas.cells_per_row, 8);
        assert_eq!(cfg.blocks, Some(PathBuf::from("blocks.toml")));
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(QuarryConfig::from_toml_str("[world]\nview_radius = \"far\"").is_err());
        assert!(QuarryConfig::load_from_path("/nonexistent/quarry.toml").is_err());
    }
}
