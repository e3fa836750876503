use std::sync::Arc;

use crate::worldgen::WorldGenParams;

use super::generation::{ColumnSample, ColumnSampler};
use super::noise::NoiseStack;

/// Terrain synthesizer: one seed plus the generation parameters.
/// Every sub-seed is derived from `seed`, so two worlds with equal seed and
/// params produce identical chunks.
#[derive(Clone, Debug)]
pub struct World {
    seed: i32,
    params: Arc<WorldGenParams>,
}

impl World {
    pub fn new(seed: i32) -> Self {
        Self::with_params(seed, WorldGenParams::default())
    }

    pub fn with_params(seed: i32, params: WorldGenParams) -> Self {
        Self {
            seed,
            params: Arc::new(params),
        }
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    #[inline]
    pub fn params(&self) -> &WorldGenParams {
        &self.params
    }

    pub fn reseed(&mut self, seed: i32) {
        self.seed = seed;
    }

    pub fn make_noise(&self) -> NoiseStack {
        NoiseStack::new(self.seed, &self.params)
    }

    /// Height and climate of one world column.
    pub fn column(&self, x: i32, z: i32) -> ColumnSample {
        // PERF: builds a fresh noise stack per call; batch through `ColumnSampler` for many columns.
        let noise = self.make_noise();
        ColumnSampler::new(&noise, &self.params).sample(x, z)
    }
}
