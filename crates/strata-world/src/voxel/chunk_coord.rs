use serde::{Deserialize, Serialize};

use super::CHUNK_SIZE;

/// Packs a chunk coordinate into one key: x in the high half, z reinterpreted
/// as unsigned in the low half so negative z cannot bleed into x.
#[inline]
pub const fn chunk_key(cx: i32, cz: i32) -> u64 {
    ((cx as u32 as u64) << 32) | (cz as u32 as u64)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    #[inline]
    pub const fn key(self) -> u64 {
        chunk_key(self.cx, self.cz)
    }

    #[inline]
    pub const fn from_key(key: u64) -> Self {
        Self {
            cx: (key >> 32) as u32 as i32,
            cz: key as u32 as i32,
        }
    }

    /// Chunk containing the world-space column `(x, z)`; rounds toward
    /// negative infinity so -0.5 lands in chunk -1.
    #[inline]
    pub fn from_world(x: f32, z: f32) -> Self {
        Self::from_block(x.floor() as i32, z.floor() as i32)
    }

    #[inline]
    pub fn from_block(wx: i32, wz: i32) -> Self {
        let s = CHUNK_SIZE as i32;
        Self {
            cx: wx.div_euclid(s),
            cz: wz.div_euclid(s),
        }
    }

    /// World-space block coordinate of local `(0, 0)`.
    #[inline]
    pub fn world_origin(self) -> (i32, i32) {
        let s = CHUNK_SIZE as i32;
        (self.cx.wrapping_mul(s), self.cz.wrapping_mul(s))
    }

    /// Neighbour `dx, dz` chunks away; wraps at the edge of the i32 range.
    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx.wrapping_add(dx),
            cz: self.cz.wrapping_add(dz),
        }
    }

    #[inline]
    pub fn manhattan(self, other: ChunkCoord) -> u64 {
        u64::from(self.cx.abs_diff(other.cx)) + u64::from(self.cz.abs_diff(other.cz))
    }

    #[inline]
    pub fn chebyshev(self, other: ChunkCoord) -> u32 {
        self.cx.abs_diff(other.cx).max(self.cz.abs_diff(other.cz))
    }

    /// Every coordinate within Chebyshev `radius` of `self`, row by row.
    pub fn square(self, radius: i32) -> impl Iterator<Item = ChunkCoord> {
        let r = radius.max(0);
        (-r..=r).flat_map(move |dx| (-r..=r).map(move |dz| self.offset(dx, dz)))
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}
