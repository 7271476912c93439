use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use quarry_blocks::BlockRegistry;
use quarry_mesh_cpu::TextureAtlas;
use quarry_world::{MAX_STREAM_RADIUS, World};

mod config;
mod sim;

use config::QuarryConfig;
use sim::{HeadlessSink, Session};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless voxel world driver", long_about = None)]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Streaming radius in chunks; overrides `[world] view_radius`
    #[arg(long)]
    radius: Option<u32>,

    /// Frames to simulate
    #[arg(long, default_value_t = 60)]
    frames: u32,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    start_x: i32,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    start_z: i32,

    /// Blocks the focus moves along +X per frame
    #[arg(long, default_value_t = 4, allow_hyphen_values = true)]
    step: i32,

    /// Log filter, e.g. "debug" or "quarry_world=debug"; overrides RUST_LOG
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut log_builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(filter) = &args.log {
        log_builder.parse_filters(filter);
    }
    log_builder.init();

    let cfg = match &args.config {
        Some(path) => QuarryConfig::load_from_path(path)?,
        None => QuarryConfig::default(),
    };
    let reg = match &cfg.blocks {
        Some(path) => BlockRegistry::load_from_path(path)?,
        None => BlockRegistry::builtin(),
    };
    log::info!("block registry: {} types", reg.len());
    let atlas = TextureAtlas::from_config(&cfg.atlas)?;
    let world = World::with_params(cfg.terrain.clone())?;
    let mut radius = args.radius.unwrap_or(cfg.world.view_radius);
    if radius > MAX_STREAM_RADIUS {
        log::warn!("view radius {} clamped to {}", radius, MAX_STREAM_RADIUS);
        radius = MAX_STREAM_RADIUS;
    }

    let mut session = Session::new(
        world,
        Arc::new(reg),
        atlas,
        radius,
        (args.start_x, args.start_z),
        args.step,
    );
    let mut sink = HeadlessSink::default();
    for frame in 0..args.frames {
        let stats = session.frame(&mut sink);
        log::debug!(
            "frame {}: +{} -{} meshed={} dug={:?}",
            frame,
            stats.loaded,
            stats.unloaded,
            stats.rebuilt,
            stats.dug
        );
    }

    let (vertices, indices) = sink.totals();
    log::info!(
        "{} frames, focus={:?}, chunks={}, meshes={}, uploads={}, vertices={}, indices={}",
        args.frames,
        session.focus(),
        session.world.loaded_chunk_count(),
        sink.resident_chunks(),
        sink.uploads,
        vertices,
        indices
    );
    Ok(())
}
