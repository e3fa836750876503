use crate::chunk::ChunkMeshCPU;
use crate::vertex::Vertex;

/// One vertex/index pair covering every loaded chunk, ready for a
/// wholesale upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CombinedMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub chunks: usize,
}

impl CombinedMesh {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Concatenates chunk meshes in iteration order, rebasing each chunk's
/// indices by the number of vertices already written.
pub fn merge_meshes<'a, I>(meshes: I) -> CombinedMesh
where
    I: IntoIterator<Item = &'a ChunkMeshCPU>,
{
    let meshes: Vec<&ChunkMeshCPU> = meshes.into_iter().collect();
    let total_v: usize = meshes.iter().map(|m| m.vertices.len()).sum();
    let total_i: usize = meshes.iter().map(|m| m.indices.len()).sum();
    let mut out = CombinedMesh {
        vertices: Vec::with_capacity(total_v),
        indices: Vec::with_capacity(total_i),
        chunks: meshes.len(),
    };
    for mesh in meshes {
        let base = out.vertices.len() as u32;
        out.vertices.extend_from_slice(&mesh.vertices);
        out.indices.extend(mesh.indices.iter().map(|i| base + i));
    }
    out
}
