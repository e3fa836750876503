use strata_blocks::VoxelType;

use super::column_sampler::ColumnPlan;
use crate::voxel::{Biome, CHUNK_SIZE, VoxelGrid, WORLD_HEIGHT};
use crate::worldgen::WorldGenParams;

/// Material for the first exposed stone cell of a column.
pub fn surface_material(biome: Biome, y: i32, p: &WorldGenParams) -> VoxelType {
    match biome {
        Biome::Desert | Biome::Beach => VoxelType::Sand,
        Biome::Ocean if p.ocean_gravel => {
            if y < p.sea_level {
                VoxelType::Sand
            } else {
                VoxelType::Gravel
            }
        }
        Biome::Ocean => VoxelType::Sand,
        _ => VoxelType::Grass,
    }
}

/// Top-down pass over every column: the first stone under air becomes the
/// biome surface, the next few become dirt. Air resets the depth, so cave
/// ceilings and overhangs get dressed like the main surface.
pub(super) fn dress_surface(grid: &mut VoxelGrid, plan: &ColumnPlan, p: &WorldGenParams) {
    for lx in 0..CHUNK_SIZE {
        for lz in 0..CHUNK_SIZE {
            let biome = plan.at(lx, lz).biome;
            let mut depth = 0;
            for y in (0..WORLD_HEIGHT).rev() {
                match grid.get_local(lx, y, lz) {
                    VoxelType::Air => depth = 0,
                    VoxelType::Stone => {
                        if depth == 0 {
                            grid.set_local(lx, y, lz, surface_material(biome, y as i32, p));
                        } else if depth < p.topsoil_depth {
                            grid.set_local(lx, y, lz, VoxelType::Dirt);
                        }
                        depth += 1;
                    }
                    _ => {}
                }
            }
        }
    }
}
