use fastrand::Rng;
use strata_blocks::VoxelType;

use super::column_sampler::ColumnPlan;
use crate::voxel::{CHUNK_SIZE, ChunkCoord, VoxelGrid, WORLD_HEIGHT};
use crate::worldgen::WorldGenParams;

const BEDROCK_SALT: u64 = 0xB3D2_0C4B_9E37_79B9;

/// Seed of the bedrock RNG for one world column. Depends only on
/// `(seed, x, z)`, so a column reads the same from every chunk pass.
#[inline]
fn column_seed(x: i32, z: i32, seed: i32) -> u64 {
    let packed = (u64::from(x as u32) << 32) | u64::from(z as u32);
    packed ^ u64::from(seed as u32).wrapping_mul(BEDROCK_SALT)
}

/// Top of the bedrock layer for one column, in `0..=bedrock_max`.
/// Always at least 0, so the floor of the world is sealed.
#[inline]
pub(super) fn bedrock_top(x: i32, z: i32, seed: i32, bedrock_max: i32) -> i32 {
    Rng::with_seed(column_seed(x, z, seed)).i32(0..=bedrock_max.max(0))
}

/// Bedrock floor, stone up to the column height, water up to sea level, air above.
pub(super) fn fill_columns(
    grid: &mut VoxelGrid,
    plan: &ColumnPlan,
    coord: ChunkCoord,
    seed: i32,
    p: &WorldGenParams,
) {
    let (ox, oz) = coord.world_origin();
    for lx in 0..CHUNK_SIZE {
        for lz in 0..CHUNK_SIZE {
            let surface = plan.at(lx, lz).surface_y();
            let bedrock = bedrock_top(
                ox.wrapping_add(lx as i32),
                oz.wrapping_add(lz as i32),
                seed,
                p.bedrock_max,
            );
            for y in 0..WORLD_HEIGHT {
                let yi = y as i32;
                let v = if yi <= p.bedrock_max {
                    if yi <= bedrock {
                        VoxelType::Bedrock
                    } else {
                        VoxelType::Stone
                    }
                } else if yi <= surface {
                    VoxelType::Stone
                } else if yi <= p.sea_level {
                    VoxelType::Water
                } else {
                    VoxelType::Air
                };
                grid.set_local(lx, y, lz, v);
            }
        }
    }
}
