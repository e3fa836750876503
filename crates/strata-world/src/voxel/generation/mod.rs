mod caves;
mod column_sampler;
mod decorate;
mod fill;
mod surface;
mod trees;

use std::time::Instant;

use fastrand::Rng;

use super::{ChunkCoord, VoxelGrid, World};

pub use self::caves::{carves, cave_threshold};
pub use self::column_sampler::{ColumnPlan, ColumnSample, ColumnSampler, compose_height};
pub use self::surface::surface_material;
pub use self::trees::tree_density;

use self::caves::carve_caves;
use self::decorate::decorate_surface;
use self::fill::fill_columns;
use self::surface::dress_surface;
use self::trees::plant_trees;

const DECORATE_STREAM: u64 = 0xD3C0_5A7E_0000_0001;

/// Seed of the per-chunk RNG. Fixed hash combination of world seed and chunk
/// coordinate; wrapping so extreme coordinates stay defined.
#[inline]
pub fn chunk_rng_seed(seed: i32, coord: ChunkCoord) -> u64 {
    let mixed = seed
        .wrapping_add(coord.cx.wrapping_mul(73_856_093))
        .wrapping_add(coord.cz.wrapping_mul(19_349_663));
    u64::from(mixed as u32)
}

impl World {
    /// Synthesizes one chunk. Reads nothing outside `(seed, params, coord)`, so
    /// any number of chunks can be generated concurrently.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> VoxelGrid {
        let t0 = Instant::now();
        let params = self.params();
        let noise = self.make_noise();
        let sampler = ColumnSampler::new(&noise, params);
        let plan = ColumnPlan::sample(&sampler, coord);

        let mut grid = VoxelGrid::air();
        fill_columns(&mut grid, &plan, coord, self.seed(), params);
        let carved = if params.caves_enable {
            carve_caves(&mut grid, &plan, &noise, coord, params)
        } else {
            0
        };
        dress_surface(&mut grid, &plan, params);

        let rng_seed = chunk_rng_seed(self.seed(), coord);
        let trees = if params.trees_enable {
            plant_trees(&mut grid, &plan, &mut Rng::with_seed(rng_seed), params)
        } else {
            0
        };
        decorate_surface(
            &mut grid,
            &plan,
            &mut Rng::with_seed(rng_seed ^ DECORATE_STREAM),
            params,
        );

        log::trace!(
            target: "worldgen",
            "chunk ({}, {}) carved={} trees={} in {}us",
            coord.cx,
            coord.cz,
            carved,
            trees,
            t0.elapsed().as_micros()
        );
        grid
    }
}
