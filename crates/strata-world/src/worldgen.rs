use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub climate: Climate,
    #[serde(default)]
    pub caves: Caves,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub trees: Trees,
    #[serde(default)]
    pub decorate: Decorate,
}

/// Frequency plus FBm octave count for one noise field.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct NoiseField {
    pub frequency: f32,
    #[serde(default = "default_octaves")]
    pub octaves: i32,
}
fn default_octaves() -> i32 {
    3
}
impl NoiseField {
    pub const fn new(frequency: f32, octaves: i32) -> Self {
        Self { frequency, octaves }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_continentalness")]
    pub continentalness: NoiseField,
    #[serde(default = "default_erosion")]
    pub erosion: NoiseField,
    #[serde(default = "default_peaks")]
    pub peaks_valleys: NoiseField,
    #[serde(default = "default_weirdness")]
    pub weirdness: NoiseField,
    #[serde(default = "default_continental_power")]
    pub continental_power: f32,
    #[serde(default = "default_base_height")]
    pub base_height: f32,
    #[serde(default = "default_continental_scale")]
    pub continental_scale: f32,
    #[serde(default = "default_mountain_scale")]
    pub mountain_scale: f32,
    #[serde(default)]
    pub ridge_scale: f32,
    #[serde(default = "default_max_height")]
    pub max_height: f32,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
}
fn default_continentalness() -> NoiseField {
    NoiseField::new(0.001, 5)
}
fn default_erosion() -> NoiseField {
    NoiseField::new(0.002, 3)
}
fn default_peaks() -> NoiseField {
    NoiseField::new(0.003, 3)
}
fn default_weirdness() -> NoiseField {
    NoiseField::new(0.004, 5)
}
fn default_continental_power() -> f32 {
    1.3
}
fn default_base_height() -> f32 {
    40.0
}
fn default_continental_scale() -> f32 {
    80.0
}
fn default_mountain_scale() -> f32 {
    120.0
}
fn default_max_height() -> f32 {
    320.0
}
fn default_sea_level() -> i32 {
    crate::voxel::SEA_LEVEL
}
impl Default for Height {
    fn default() -> Self {
        Self {
            continentalness: default_continentalness(),
            erosion: default_erosion(),
            peaks_valleys: default_peaks(),
            weirdness: default_weirdness(),
            continental_power: default_continental_power(),
            base_height: default_base_height(),
            continental_scale: default_continental_scale(),
            mountain_scale: default_mountain_scale(),
            ridge_scale: 0.0,
            max_height: default_max_height(),
            sea_level: default_sea_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Climate {
    #[serde(default = "default_temperature")]
    pub temperature: NoiseField,
    #[serde(default = "default_humidity")]
    pub humidity: NoiseField,
    #[serde(default = "default_forest")]
    pub forest: NoiseField,
}
fn default_temperature() -> NoiseField {
    NoiseField::new(0.0005, 5)
}
fn default_humidity() -> NoiseField {
    NoiseField::new(0.0007, 3)
}
fn default_forest() -> NoiseField {
    NoiseField::new(0.002, 5)
}
impl Default for Climate {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            humidity: default_humidity(),
            forest: default_forest(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Caves {
    #[serde(default = "default_true")]
    pub enable: bool,
    #[serde(default = "default_cheese")]
    pub cheese: NoiseField,
    #[serde(default = "default_noodle")]
    pub noodle: NoiseField,
    #[serde(default = "default_spaghetti")]
    pub spaghetti: NoiseField,
    #[serde(default = "default_cave_min_y")]
    pub min_y: i32,
    #[serde(default = "default_cave_max_y")]
    pub max_y: i32,
    #[serde(default = "default_surface_margin")]
    pub surface_margin: i32,
}
fn default_true() -> bool {
    true
}
fn default_cheese() -> NoiseField {
    NoiseField::new(0.03, 3)
}
fn default_noodle() -> NoiseField {
    NoiseField::new(0.08, 3)
}
fn default_spaghetti() -> NoiseField {
    NoiseField::new(0.05, 3)
}
fn default_cave_min_y() -> i32 {
    10
}
fn default_cave_max_y() -> i32 {
    100
}
fn default_surface_margin() -> i32 {
    4
}
impl Default for Caves {
    fn default() -> Self {
        Self {
            enable: true,
            cheese: default_cheese(),
            noodle: default_noodle(),
            spaghetti: default_spaghetti(),
            min_y: default_cave_min_y(),
            max_y: default_cave_max_y(),
            surface_margin: default_surface_margin(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Surface {
    #[serde(default = "default_topsoil")]
    pub topsoil_depth: i32,
    #[serde(default = "default_bedrock_max")]
    pub bedrock_max: i32,
    #[serde(default = "default_true")]
    pub ocean_gravel: bool,
}
fn default_topsoil() -> i32 {
    4
}
fn default_bedrock_max() -> i32 {
    4
}
impl Default for Surface {
    fn default() -> Self {
        Self {
            topsoil_depth: default_topsoil(),
            bedrock_max: default_bedrock_max(),
            ocean_gravel: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Trees {
    #[serde(default = "default_true")]
    pub enable: bool,
    #[serde(default = "default_forest_density")]
    pub forest_density: f32,
    #[serde(default = "default_jungle_density")]
    pub jungle_density: f32,
    #[serde(default = "default_taiga_density")]
    pub taiga_density: f32,
    #[serde(default = "default_plains_density")]
    pub plains_density: f32,
    #[serde(default = "default_trunk_min")]
    pub trunk_min: i32,
    #[serde(default = "default_trunk_max")]
    pub trunk_max: i32,
    #[serde(default = "default_ground_min")]
    pub ground_min: i32,
    #[serde(default = "default_ground_max")]
    pub ground_max: i32,
    #[serde(default = "default_canopy_radius")]
    pub canopy_radius: i32,
    #[serde(default = "default_jungle_canopy_radius")]
    pub jungle_canopy_radius: i32,
}
fn default_forest_density() -> f32 {
    0.08
}
fn default_jungle_density() -> f32 {
    0.12
}
fn default_taiga_density() -> f32 {
    0.05
}
fn default_plains_density() -> f32 {
    0.015
}
fn default_trunk_min() -> i32 {
    5
}
fn default_trunk_max() -> i32 {
    12
}
fn default_ground_min() -> i32 {
    4
}
fn default_ground_max() -> i32 {
    200
}
fn default_canopy_radius() -> i32 {
    4
}
fn default_jungle_canopy_radius() -> i32 {
    5
}
impl Default for Trees {
    fn default() -> Self {
        Self {
            enable: true,
            forest_density: default_forest_density(),
            jungle_density: default_jungle_density(),
            taiga_density: default_taiga_density(),
            plains_density: default_plains_density(),
            trunk_min: default_trunk_min(),
            trunk_max: default_trunk_max(),
            ground_min: default_ground_min(),
            ground_max: default_ground_max(),
            canopy_radius: default_canopy_radius(),
            jungle_canopy_radius: default_jungle_canopy_radius(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Decorate {
    #[serde(default = "default_taiga_snow")]
    pub taiga_snow: f32,
    #[serde(default = "default_mountain_snow")]
    pub mountain_snow: f32,
    #[serde(default = "default_snow_line")]
    pub snow_line: i32,
    #[serde(default = "default_grass_plants")]
    pub grass_plants: f32,
}
fn default_taiga_snow() -> f32 {
    0.7
}
fn default_mountain_snow() -> f32 {
    0.9
}
fn default_snow_line() -> i32 {
    140
}
fn default_grass_plants() -> f32 {
    0.25
}
impl Default for Decorate {
    fn default() -> Self {
        Self {
            taiga_snow: default_taiga_snow(),
            mountain_snow: default_mountain_snow(),
            snow_line: default_snow_line(),
            grass_plants: default_grass_plants(),
        }
    }
}

/// Flattened, validated view of [`WorldGenConfig`] used on the hot path.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub continentalness: NoiseField,
    pub erosion: NoiseField,
    pub peaks_valleys: NoiseField,
    pub weirdness: NoiseField,
    pub temperature: NoiseField,
    pub humidity: NoiseField,
    pub forest: NoiseField,
    pub continental_power: f32,
    pub base_height: f32,
    pub continental_scale: f32,
    pub mountain_scale: f32,
    pub ridge_scale: f32,
    pub max_height: f32,
    pub sea_level: i32,
    pub caves_enable: bool,
    pub cheese: NoiseField,
    pub noodle: NoiseField,
    pub spaghetti: NoiseField,
    pub cave_min_y: i32,
    pub cave_max_y: i32,
    pub cave_surface_margin: i32,
    pub topsoil_depth: i32,
    pub bedrock_max: i32,
    pub ocean_gravel: bool,
    pub trees_enable: bool,
    pub forest_density: f32,
    pub jungle_density: f32,
    pub taiga_density: f32,
    pub plains_density: f32,
    pub trunk_min: i32,
    pub trunk_max: i32,
    pub ground_min: i32,
    pub ground_max: i32,
    pub canopy_radius: i32,
    pub jungle_canopy_radius: i32,
    pub taiga_snow: f32,
    pub mountain_snow: f32,
    pub snow_line: i32,
    pub grass_plants: f32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        let world_top = crate::voxel::WORLD_HEIGHT as i32 - 1;
        let trunk_min = cfg.trees.trunk_min.max(1);
        Self {
            continentalness: cfg.height.continentalness,
            erosion: cfg.height.erosion,
            peaks_valleys: cfg.height.peaks_valleys,
            weirdness: cfg.height.weirdness,
            temperature: cfg.climate.temperature,
            humidity: cfg.climate.humidity,
            forest: cfg.climate.forest,
            continental_power: cfg.height.continental_power,
            base_height: cfg.height.base_height,
            continental_scale: cfg.height.continental_scale,
            mountain_scale: cfg.height.mountain_scale,
            ridge_scale: cfg.height.ridge_scale,
            max_height: cfg.height.max_height.clamp(0.0, world_top as f32),
            sea_level: cfg.height.sea_level.clamp(0, world_top),
            caves_enable: cfg.caves.enable,
            cheese: cfg.caves.cheese,
            noodle: cfg.caves.noodle,
            spaghetti: cfg.caves.spaghetti,
            cave_min_y: cfg.caves.min_y.max(0),
            cave_max_y: cfg.caves.max_y.min(world_top),
            cave_surface_margin: cfg.caves.surface_margin.max(0),
            topsoil_depth: cfg.surface.topsoil_depth.max(1),
            bedrock_max: cfg.surface.bedrock_max.clamp(0, world_top),
            ocean_gravel: cfg.surface.ocean_gravel,
            trees_enable: cfg.trees.enable,
            forest_density: cfg.trees.forest_density,
            jungle_density: cfg.trees.jungle_density,
            taiga_density: cfg.trees.taiga_density,
            plains_density: cfg.trees.plains_density,
            trunk_min,
            trunk_max: cfg.trees.trunk_max.max(trunk_min),
            ground_min: cfg.trees.ground_min,
            ground_max: cfg.trees.ground_max,
            canopy_radius: cfg.trees.canopy_radius.max(0),
            jungle_canopy_radius: cfg.trees.jungle_canopy_radius.max(0),
            taiga_snow: cfg.decorate.taiga_snow,
            mountain_snow: cfg.decorate.mountain_snow,
            snow_line: cfg.decorate.snow_line,
            grass_plants: cfg.decorate.grass_plants,
        }
    }
}

pub fn parse_params(toml_str: &str) -> Result<WorldGenParams, Box<dyn Error>> {
    let cfg: WorldGenConfig = toml::from_str(toml_str)?;
    Ok(WorldGenParams::from_config(&cfg))
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    parse_params(&s)
}
