use serde::Deserialize;

// Top-level blocks config file: a list of per-id overrides on top of the built-in table.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub id: u16,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub liquid: Option<bool>,
    #[serde(default)]
    pub transparent: Option<bool>,
}
