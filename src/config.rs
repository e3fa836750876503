use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use strata_geom::Vec3;
use strata_runtime::StreamConfig;

/// Contents of `strata.toml`. Every key is optional.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub stream: StreamSection,
    #[serde(default)]
    pub observer: ObserverSection,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_seed")]
    pub seed: i32,
    /// Worldgen parameter file; built-in defaults when absent.
    #[serde(default)]
    pub worldgen: Option<PathBuf>,
    /// Texture overrides for the atlas.
    #[serde(default)]
    pub materials: Option<PathBuf>,
}
fn default_seed() -> i32 {
    1337
}
impl Default for WorldSection {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            worldgen: None,
            materials: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct StreamSection {
    #[serde(default = "default_radius")]
    pub radius: i32,
    #[serde(default)]
    pub workers: usize,
    #[serde(default)]
    pub snapshot_dir: Option<PathBuf>,
    #[serde(default)]
    pub snapshot_write: bool,
}
fn default_radius() -> i32 {
    8
}
impl Default for StreamSection {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            workers: 0,
            snapshot_dir: None,
            snapshot_write: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ObserverSection {
    /// Feet position at start.
    #[serde(default = "default_spawn")]
    pub spawn: [f32; 3],
    #[serde(default)]
    pub fly: bool,
    #[serde(default = "default_speed")]
    pub speed: f32,
}
fn default_spawn() -> [f32; 3] {
    [8.0, 160.0, 8.0]
}
fn default_speed() -> f32 {
    8.0
}
impl Default for ObserverSection {
    fn default() -> Self {
        Self {
            spawn: default_spawn(),
            fly: false,
            speed: default_speed(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: AppConfig = toml::from_str(toml_str)?;
        if cfg.stream.radius < 0 {
            return Err(format!("stream.radius must be >= 0, got {}", cfg.stream.radius).into());
        }
        Ok(cfg)
    }

    /// Relative paths inside the file resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        let mut cfg = Self::from_toml_str(&s)?;
        if let Some(base) = path.parent() {
            for p in [
                &mut cfg.world.worldgen,
                &mut cfg.world.materials,
                &mut cfg.stream.snapshot_dir,
            ]
            .into_iter()
            .flatten()
            {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        }
        Ok(cfg)
    }

    pub fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            radius: self.stream.radius,
            workers: self.stream.workers,
            snapshot_dir: self.stream.snapshot_dir.clone(),
            snapshot_write: self.stream.snapshot_write,
        }
    }

    pub fn spawn(&self) -> Vec3 {
        let [x, y, z] = self.observer.spawn;
        Vec3::new(x, y, z)
    }
}
