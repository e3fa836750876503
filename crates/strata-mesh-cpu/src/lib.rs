//! CPU meshing crate: per-cell cube faces with vertex dedup, and the merge
//! of chunk meshes into one drawable buffer.
#![forbid(unsafe_code)]

mod build;
mod chunk;
mod face;
mod merge;
mod mesh_build;
mod vertex;

pub use build::{build_chunk_mesh, face_material};
pub use chunk::ChunkMeshCPU;
pub use face::Face;
pub use merge::{CombinedMesh, merge_meshes};
pub use mesh_build::MeshBuild;
pub use vertex::{LEAF_TINT, Vertex, VertexKey, WHITE};
