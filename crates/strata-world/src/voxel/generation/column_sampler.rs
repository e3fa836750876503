use crate::voxel::biome::{Biome, classify};
use crate::voxel::noise::NoiseStack;
use crate::voxel::{CHUNK_SIZE, ChunkCoord};
use crate::worldgen::WorldGenParams;

/// Climate and elevation of one world column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSample {
    pub height: f32,
    pub biome: Biome,
    pub temperature: f32,
    pub humidity: f32,
    pub forest: f32,
}

impl ColumnSample {
    /// Top solid y before carving and dressing.
    #[inline]
    pub fn surface_y(&self) -> i32 {
        self.height.floor() as i32
    }
}

/// Combines the height signals into one elevation.
///
/// `c`, `e`, `pv`, and `w` are raw noise in `[-1, 1]`. Continentalness lifts
/// the base, peaks/valleys add mountains scaled by continentalness, erosion
/// damps those mountains, and weirdness contributes an optional ridge term.
pub fn compose_height(c: f32, e: f32, pv: f32, w: f32, p: &WorldGenParams) -> f32 {
    let cont = ((c + 1.0) * 0.5).clamp(0.0, 1.0).powf(p.continental_power);
    let peak = {
        let folded = 1.0 - pv.abs();
        folded * folded
    };
    let erosion = ((e + 1.0) * 0.5).clamp(0.0, 1.0);
    let base = p.base_height + cont * p.continental_scale;
    let mountain = peak * cont * p.mountain_scale * (1.0 - erosion);
    let ridge = w.max(0.0) * p.ridge_scale;
    (base + mountain + ridge).clamp(0.0, p.max_height)
}

pub struct ColumnSampler<'a> {
    noise: &'a NoiseStack,
    params: &'a WorldGenParams,
}

impl<'a> ColumnSampler<'a> {
    pub fn new(noise: &'a NoiseStack, params: &'a WorldGenParams) -> Self {
        Self { noise, params }
    }

    pub fn height_at(&self, x: i32, z: i32) -> f32 {
        let (fx, fz) = (x as f32, z as f32);
        let n = self.noise;
        compose_height(
            n.continentalness.get_noise_2d(fx, fz),
            n.erosion.get_noise_2d(fx, fz),
            n.peaks_valleys.get_noise_2d(fx, fz),
            n.weirdness.get_noise_2d(fx, fz),
            self.params,
        )
    }

    pub fn sample(&self, x: i32, z: i32) -> ColumnSample {
        let (fx, fz) = (x as f32, z as f32);
        let height = self.height_at(x, z);
        let temperature = self.noise.temperature.get_noise_2d(fx, fz);
        let humidity = self.noise.humidity.get_noise_2d(fx, fz);
        let forest = self.noise.forest.get_noise_2d(fx, fz);
        ColumnSample {
            height,
            biome: classify(height, temperature, humidity, forest, self.params.sea_level),
            temperature,
            humidity,
            forest,
        }
    }
}

/// Column samples for one chunk, indexed `[x][z]` in local coordinates.
pub struct ColumnPlan {
    columns: [[ColumnSample; CHUNK_SIZE]; CHUNK_SIZE],
}

impl ColumnPlan {
    pub fn sample(sampler: &ColumnSampler<'_>, coord: ChunkCoord) -> Self {
        let (ox, oz) = coord.world_origin();
        let columns = std::array::from_fn(|lx| {
            std::array::from_fn(|lz| {
                sampler.sample(ox.wrapping_add(lx as i32), oz.wrapping_add(lz as i32))
            })
        });
        Self { columns }
    }

    #[inline]
    pub fn at(&self, lx: usize, lz: usize) -> &ColumnSample {
        &self.columns[lx][lz]
    }

    /// Every column of the chunk set to `sample`.
    #[cfg(test)]
    pub(crate) fn uniform(sample: ColumnSample) -> Self {
        Self {
            columns: [[sample; CHUNK_SIZE]; CHUNK_SIZE],
        }
    }
}
