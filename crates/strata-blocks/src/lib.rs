//! Voxel types and the material/texture table.
#![forbid(unsafe_code)]

pub mod material;
pub mod types;

pub use material::{MaterialCatalog, material_index, texture_path};
pub use types::VoxelType;
