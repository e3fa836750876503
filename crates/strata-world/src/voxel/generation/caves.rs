use strata_blocks::VoxelType;

use super::column_sampler::ColumnPlan;
use crate::voxel::noise::NoiseStack;
use crate::voxel::{CHUNK_SIZE, ChunkCoord, VoxelGrid};
use crate::worldgen::WorldGenParams;

/// Carve threshold at height `y`. Deeper cells get a higher bar, so caves
/// thin out toward the floor.
#[inline]
pub fn cave_threshold(y: i32) -> f32 {
    0.65 - (y as f32 / 256.0) * 0.3
}

/// True when any of the three fields clears its scaled threshold.
#[inline]
pub fn carves(cheese: f32, noodle: f32, spaghetti: f32, y: i32) -> bool {
    let t = cave_threshold(y);
    cheese > t * 1.2 || noodle > t * 0.9 || spaghetti > t
}

/// Clears solid non-bedrock cells inside the cave band to AIR.
/// Returns the number of carved cells.
pub(super) fn carve_caves(
    grid: &mut VoxelGrid,
    plan: &ColumnPlan,
    noise: &NoiseStack,
    coord: ChunkCoord,
    p: &WorldGenParams,
) -> usize {
    let (ox, oz) = coord.world_origin();
    let mut carved = 0;
    for lx in 0..CHUNK_SIZE {
        for lz in 0..CHUNK_SIZE {
            let top = plan.at(lx, lz).surface_y() - p.cave_surface_margin;
            let y_max = p.cave_max_y.min(top);
            if y_max < p.cave_min_y {
                continue;
            }
            let fx = ox.wrapping_add(lx as i32) as f32;
            let fz = oz.wrapping_add(lz as i32) as f32;
            for y in p.cave_min_y..=y_max {
                let yu = y as usize;
                let v = grid.get_local(lx, yu, lz);
                if !v.is_solid() || v == VoxelType::Bedrock {
                    continue;
                }
                let fy = y as f32;
                let cheese = noise.cheese.get_noise_3d(fx, fy, fz);
                let noodle = noise.noodle.get_noise_3d(fx, fy, fz);
                let spaghetti = noise.spaghetti.get_noise_3d(fx, fy, fz);
                if carves(cheese, noodle, spaghetti, y) {
                    grid.set_local(lx, yu, lz, VoxelType::Air);
                    carved += 1;
                }
            }
        }
    }
    carved
}
