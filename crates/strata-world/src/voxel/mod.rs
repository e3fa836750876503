/// Horizontal span of a chunk in voxels (x and z).
pub const CHUNK_SIZE: usize = 16;
/// Vertical span of every chunk; chunks are full-height columns.
pub const WORLD_HEIGHT: usize = 384;
pub const SEA_LEVEL: i32 = 62;

mod biome;
mod chunk_coord;
pub mod generation;
mod grid;
mod noise;
mod world;

pub use biome::{Biome, classify};
pub use chunk_coord::{ChunkCoord, chunk_key};
pub use generation::ColumnSample;
pub use grid::VoxelGrid;
pub use noise::NoiseStack;
pub use world::World;
