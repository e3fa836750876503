//! World sizing, chunk coordinates, voxel grids, and terrain synthesis.
#![forbid(unsafe_code)]

pub mod voxel;
pub mod worldgen;

pub use voxel::{
    Biome, CHUNK_SIZE, ChunkCoord, ColumnSample, SEA_LEVEL, VoxelGrid, WORLD_HEIGHT, World,
    chunk_key,
};
pub use worldgen::WorldGenParams;
