//! Loaded chunks, the keyed chunk store, and block queries over it.
#![forbid(unsafe_code)]

use std::sync::Arc;

use strata_mesh_cpu::ChunkMeshCPU;
use strata_world::{ChunkCoord, VoxelGrid, World};

mod raycast;
mod store;

pub use raycast::{RayHit, raycast_first_hit_with_face};
pub use store::{ChunkStore, MeshJob};

/// One resident chunk. The grid is shared read-only with meshing workers;
/// the mesh stays empty until a pass builds it.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub grid: Arc<VoxelGrid>,
    pub mesh: Option<Arc<ChunkMeshCPU>>,
}

impl Chunk {
    pub fn new(coord: ChunkCoord, grid: VoxelGrid) -> Self {
        Self {
            coord,
            grid: Arc::new(grid),
            mesh: None,
        }
    }

    #[inline]
    pub fn key(&self) -> u64 {
        self.coord.key()
    }

    #[inline]
    pub fn is_meshed(&self) -> bool {
        self.mesh.is_some()
    }
}

/// Synthesizes a fresh, unmeshed chunk.
pub fn generate_chunk(world: &World, coord: ChunkCoord) -> Chunk {
    Chunk::new(coord, world.generate_chunk(coord))
}
