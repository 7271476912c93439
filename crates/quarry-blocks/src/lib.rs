//! Block types, block values, and the block property registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use config::{BlockDef, BlocksConfig};
pub use registry::{BlockProps, BlockRegistry};
pub use types::{Block, BlockType, MAX_LIGHT};
