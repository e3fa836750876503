use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::worldgen::{NoiseField, WorldGenParams};

/// Per-field salts mixed into the world seed. Each field gets its own
/// generator so no two signals are correlated.
const SALT_CONTINENTALNESS: i32 = 0x0000_0000;
const SALT_EROSION: i32 = 0x1B87_3593;
const SALT_PEAKS: i32 = 0x2C1B_3C6D;
const SALT_WEIRDNESS: i32 = 0x297A_2D39;
const SALT_TEMPERATURE: i32 = 0x1203_5F31;
const SALT_HUMIDITY: i32 = 0x12E3_A1B2;
const SALT_FOREST: i32 = 0x5EED_BA5E;
const SALT_CHEESE: i32 = 0x0CAF_E5E5;
const SALT_NOODLE: i32 = 0x00C0_FFEE;
const SALT_SPAGHETTI: i32 = 0x0DEA_DBEE;

/// Seeded noise generators for one generation run. Cheap to build, so each
/// chunk gets a fresh stack and nothing is shared between worker threads.
pub struct NoiseStack {
    pub continentalness: FastNoiseLite,
    pub erosion: FastNoiseLite,
    pub peaks_valleys: FastNoiseLite,
    pub weirdness: FastNoiseLite,
    pub temperature: FastNoiseLite,
    pub humidity: FastNoiseLite,
    pub forest: FastNoiseLite,
    pub cheese: FastNoiseLite,
    pub noodle: FastNoiseLite,
    pub spaghetti: FastNoiseLite,
}

fn field(seed: i32, salt: i32, f: NoiseField) -> FastNoiseLite {
    let mut n = FastNoiseLite::with_seed(seed ^ salt);
    n.set_noise_type(Some(NoiseType::OpenSimplex2));
    n.set_frequency(Some(f.frequency));
    if f.octaves > 1 {
        n.set_fractal_type(Some(FractalType::FBm));
        n.set_fractal_octaves(Some(f.octaves));
    }
    n
}

impl NoiseStack {
    pub fn new(seed: i32, p: &WorldGenParams) -> Self {
        Self {
            continentalness: field(seed, SALT_CONTINENTALNESS, p.continentalness),
            erosion: field(seed, SALT_EROSION, p.erosion),
            peaks_valleys: field(seed, SALT_PEAKS, p.peaks_valleys),
            weirdness: field(seed, SALT_WEIRDNESS, p.weirdness),
            temperature: field(seed, SALT_TEMPERATURE, p.temperature),
            humidity: field(seed, SALT_HUMIDITY, p.humidity),
            forest: field(seed, SALT_FOREST, p.forest),
            cheese: field(seed, SALT_CHEESE, p.cheese),
            noodle: field(seed, SALT_NOODLE, p.noodle),
            spaghetti: field(seed, SALT_SPAGHETTI, p.spaghetti),
        }
    }
}
