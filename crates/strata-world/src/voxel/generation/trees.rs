use fastrand::Rng;
use strata_blocks::VoxelType;

use super::column_sampler::ColumnPlan;
use crate::voxel::{Biome, CHUNK_SIZE, VoxelGrid, WORLD_HEIGHT};
use crate::worldgen::WorldGenParams;

/// Per-column chance of a tree.
pub fn tree_density(biome: Biome, p: &WorldGenParams) -> f32 {
    match biome {
        Biome::Forest => p.forest_density,
        Biome::Jungle => p.jungle_density,
        Biome::Taiga => p.taiga_density,
        Biome::Plains => p.plains_density,
        _ => 0.0,
    }
}

#[inline]
fn is_ground(v: VoxelType) -> bool {
    matches!(v, VoxelType::Grass | VoxelType::Dirt | VoxelType::Sand)
}

/// Trunks and canopies, confined to this chunk. Returns the number of trees.
pub(super) fn plant_trees(
    grid: &mut VoxelGrid,
    plan: &ColumnPlan,
    rng: &mut Rng,
    p: &WorldGenParams,
) -> usize {
    let ceiling = WORLD_HEIGHT as i32 - 1;
    let mut planted = 0;
    for lx in 0..CHUNK_SIZE {
        for lz in 0..CHUNK_SIZE {
            let biome = plan.at(lx, lz).biome;
            let density = tree_density(biome, p);
            if density <= 0.0 || rng.f32() > density {
                continue;
            }
            let Some(ground) = grid.top_where(lx, lz, is_ground).map(|y| y as i32) else {
                continue;
            };
            if ground < p.ground_min || ground > p.ground_max {
                continue;
            }
            let height = rng.i32(p.trunk_min..=p.trunk_max);
            for h in 1..=height {
                let ty = ground + h;
                if ty >= ceiling {
                    break;
                }
                grid.set_local(lx, ty as usize, lz, VoxelType::Wood);
            }
            let radius = if biome == Biome::Jungle {
                p.jungle_canopy_radius
            } else {
                p.canopy_radius
            };
            place_canopy(grid, rng, lx as i32, ground + height, lz as i32, radius);
            planted += 1;
        }
    }
    planted
}

/// Squashed sphere of leaves around `(cx, top, cz)`. The radius is jittered
/// per cell so the edge is ragged. Only AIR cells are filled.
fn place_canopy(grid: &mut VoxelGrid, rng: &mut Rng, cx: i32, top: i32, cz: i32, radius: i32) {
    let r = radius as f32;
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            for dy in -radius / 2..=radius {
                let (x, y, z) = (cx + dx, top + dy, cz + dz);
                if !VoxelGrid::in_bounds(x, y, z) || y >= WORLD_HEIGHT as i32 - 1 {
                    continue;
                }
                let (fx, fy, fz) = (dx as f32, dy as f32, dz as f32);
                let dist = (fx * fx + fy * fy * 0.7 + fz * fz).sqrt();
                if dist <= r + rng.f32() * 0.6 - 0.3
                    && grid.get_local(x as usize, y as usize, z as usize) == VoxelType::Air
                {
                    grid.set_local(x as usize, y as usize, z as usize, VoxelType::Leaves);
                }
            }
        }
    }
}
