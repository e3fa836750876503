/// Foliage tint applied to grass tops and to every leaves face.
pub const LEAF_TINT: [f32; 3] = [0.4, 0.8, 0.3];
pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tint: [f32; 3],
    pub uv: [f32; 2],
    pub material_index: f32,
}

/// Bit patterns of every vertex field. Two vertices share a key only when
/// all of their floats are bit-identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexKey([u32; 9]);

impl Vertex {
    #[inline]
    pub fn key(&self) -> VertexKey {
        let [px, py, pz] = self.position;
        let [r, g, b] = self.tint;
        let [u, v] = self.uv;
        VertexKey([
            px.to_bits(),
            py.to_bits(),
            pz.to_bits(),
            r.to_bits(),
            g.to_bits(),
            b.to_bits(),
            u.to_bits(),
            v.to_bits(),
            self.material_index.to_bits(),
        ])
    }
}
