use fastrand::Rng;
use strata_blocks::VoxelType;

use super::column_sampler::ColumnPlan;
use crate::voxel::{Biome, CHUNK_SIZE, VoxelGrid, WORLD_HEIGHT};
use crate::worldgen::WorldGenParams;

/// Highest grass cell in the column with open air directly above it. Grass
/// shaded by a canopy still counts.
fn exposed_grass(grid: &VoxelGrid, lx: usize, lz: usize) -> Option<usize> {
    (0..WORLD_HEIGHT - 1).rev().find(|&y| {
        grid.get_local(lx, y, lz) == VoxelType::Grass
            && grid.get_local(lx, y + 1, lz) == VoxelType::Air
    })
}

/// Snow caps and grass tufts on the exposed grass of each column.
pub(super) fn decorate_surface(
    grid: &mut VoxelGrid,
    plan: &ColumnPlan,
    rng: &mut Rng,
    p: &WorldGenParams,
) {
    for lx in 0..CHUNK_SIZE {
        for lz in 0..CHUNK_SIZE {
            let Some(top) = exposed_grass(grid, lx, lz) else {
                continue;
            };
            let roll = rng.f32();
            match plan.at(lx, lz).biome {
                Biome::Taiga if roll < p.taiga_snow => {
                    grid.set_local(lx, top, lz, VoxelType::Snow);
                }
                Biome::Mountains if top as i32 > p.snow_line && roll < p.mountain_snow => {
                    grid.set_local(lx, top, lz, VoxelType::Snow);
                }
                Biome::Plains | Biome::Forest if roll < p.grass_plants => {
                    grid.set_local(lx, top + 1, lz, VoxelType::GrassPlant);
                }
                _ => {}
            }
        }
    }
}
