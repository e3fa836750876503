use hashbrown::HashMap;

use crate::face::Face;
use crate::vertex::{Vertex, VertexKey};

/// Indexed triangle list under construction. Corners that match an already
/// stored vertex bit-for-bit reuse its index.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    lookup: HashMap<VertexKey, u32>,
}

impl MeshBuild {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.vertices.reserve(n_quads * 4);
        self.indices.reserve(n_quads * 6);
        self.lookup.reserve(n_quads * 4);
    }

    /// Returns the index of `v`, storing it first if no identical vertex exists.
    #[inline]
    pub fn intern(&mut self, v: Vertex) -> u32 {
        let next = self.vertices.len() as u32;
        let vertices = &mut self.vertices;
        *self.lookup.entry(v.key()).or_insert_with(|| {
            vertices.push(v);
            next
        })
    }

    /// Appends one cube face of the cell whose min corner is `origin`.
    pub fn add_face(&mut self, face: Face, origin: [f32; 3], tint: [f32; 3], material_index: f32) {
        let mut quad = [0u32; 4];
        for (slot, (offset, uv)) in quad.iter_mut().zip(face.corners()) {
            *slot = self.intern(Vertex {
                position: [
                    origin[0] + offset[0],
                    origin[1] + offset[1],
                    origin[2] + offset[2],
                ],
                tint,
                uv: *uv,
                material_index,
            });
        }
        let [i0, i1, i2, i3] = quad;
        self.indices.extend_from_slice(&[i0, i1, i2, i0, i2, i3]);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Drops the dedup table and hands back the buffers.
    pub fn into_parts(self) -> (Vec<Vertex>, Vec<u32>) {
        (self.vertices, self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::WHITE;

    #[test]
    fn a_face_is_four_vertices_six_indices() {
        let mut mb = MeshBuild::new();
        mb.add_face(Face::Top, [0.0, 0.0, 0.0], WHITE, 2.0);
        assert_eq!(mb.vertices.len(), 4);
        assert_eq!(mb.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn repeated_face_adds_no_vertices() {
        let mut mb = MeshBuild::new();
        mb.add_face(Face::North, [3.0, 4.0, 5.0], WHITE, 1.0);
        mb.add_face(Face::North, [3.0, 4.0, 5.0], WHITE, 1.0);
        assert_eq!(mb.vertices.len(), 4);
        assert_eq!(mb.indices.len(), 12);
        assert_eq!(&mb.indices[..6], &mb.indices[6..]);
    }

    #[test]
    fn material_splits_shared_corners() {
        let mut mb = MeshBuild::new();
        mb.add_face(Face::Top, [0.0, 0.0, 0.0], WHITE, 1.0);
        mb.add_face(Face::Top, [0.0, 0.0, 0.0], WHITE, 2.0);
        assert_eq!(mb.vertices.len(), 8);
    }
}
