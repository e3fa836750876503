mod config;
mod headless;
mod observer;

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Parser;
use strata_blocks::MaterialCatalog;
use strata_world::World;
use strata_world::worldgen::load_params_from_path;

use crate::config::AppConfig;
use crate::headless::HeadlessOptions;

#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Headless voxel terrain streaming driver")]
struct Cli {
    /// Path to strata.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// World seed (overrides the config file)
    #[arg(long)]
    seed: Option<i32>,
    /// Loaded radius in chunks
    #[arg(long)]
    radius: Option<i32>,
    /// Meshing workers (0 = one per core)
    #[arg(long)]
    workers: Option<usize>,
    /// Frames to simulate before exiting
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Read and write chunk snapshots in this directory
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
    /// Write the log to this file instead of stdout
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Perimeter of the scripted square walk, in blocks
    #[arg(long, default_value_t = 256.0)]
    path_length: f32,
}

impl Cli {
    fn apply(&self, cfg: &mut AppConfig) {
        if let Some(seed) = self.seed {
            cfg.world.seed = seed;
        }
        if let Some(radius) = self.radius {
            cfg.stream.radius = radius.max(0);
        }
        if let Some(workers) = self.workers {
            cfg.stream.workers = workers;
        }
        if let Some(dir) = &self.snapshot_dir {
            cfg.stream.snapshot_dir = Some(dir.clone());
            cfg.stream.snapshot_write = true;
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match log_file {
        Some(path) => {
            let config = simplelog::ConfigBuilder::new()
                .set_target_level(simplelog::LevelFilter::Error)
                .build();
            simplelog::WriteLogger::init(simplelog::LevelFilter::Info, config, File::create(path)?)?;
        }
        None => {
            env_logger::Builder::new()
                .target(env_logger::Target::Stdout)
                .filter_level(log::LevelFilter::Info)
                .parse_env("RUST_LOG")
                .init();
        }
    }
    Ok(())
}

fn build_world(cfg: &AppConfig) -> Result<World, Box<dyn Error>> {
    let world = match &cfg.world.worldgen {
        Some(path) => {
            let params = load_params_from_path(path)?;
            log::info!("worldgen params from {}", path.display());
            World::with_params(cfg.world.seed, params)
        }
        None => World::new(cfg.world.seed),
    };
    Ok(world)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut cfg = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    cli.apply(&mut cfg);

    let catalog = match &cfg.world.materials {
        Some(path) => MaterialCatalog::from_path(path)?,
        None => MaterialCatalog::new(),
    };
    let layers = catalog.atlas_layers();
    log::info!(
        "material atlas: {} layers, {} overridden",
        layers.len(),
        catalog.override_count()
    );
    for layer in &layers {
        log::debug!("  slot {:>2} {:?} -> {}", layer.slot, layer.voxel, layer.path.display());
    }

    let world = build_world(&cfg)?;
    let spawn_column = world.column(cfg.spawn().x as i32, cfg.spawn().z as i32);
    log::info!(
        "seed {}, spawn column height {:.1} ({:?})",
        world.seed(),
        spawn_column.height,
        spawn_column.biome
    );

    let summary = headless::run(
        &cfg,
        world,
        HeadlessOptions {
            frames: cli.frames,
            path_length: cli.path_length,
        },
    )?;
    log::info!(
        "{} frames, {} passes, {} uploads, {} chunks resident, ended at ({:.1}, {:.1}, {:.1})",
        summary.frames,
        summary.passes,
        summary.uploads,
        summary.loaded,
        summary.final_position.x,
        summary.final_position.y,
        summary.final_position.z
    );
    Ok(())
}
