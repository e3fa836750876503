use strata_world::ChunkCoord;

use crate::vertex::Vertex;

/// Mesh of one chunk. Positions are world-space; indices are local to
/// this chunk's own vertex array.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl ChunkMeshCPU {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
