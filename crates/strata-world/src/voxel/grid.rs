use strata_blocks::VoxelType;

use super::{CHUNK_SIZE, WORLD_HEIGHT};

/// Full-height voxel column of one chunk stored as a single flat buffer in
/// row-major `(x, y, z)` order, which is also the snapshot byte order.
#[derive(Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    cells: Box<[VoxelType]>,
}

impl VoxelGrid {
    pub const SIZE: usize = CHUNK_SIZE;
    pub const HEIGHT: usize = WORLD_HEIGHT;
    pub const VOLUME: usize = CHUNK_SIZE * WORLD_HEIGHT * CHUNK_SIZE;

    pub fn filled(v: VoxelType) -> Self {
        Self {
            cells: vec![v; Self::VOLUME].into_boxed_slice(),
        }
    }

    pub fn air() -> Self {
        Self::filled(VoxelType::Air)
    }

    /// Builds a grid from cells already in `(x, y, z)` order; `None` on a length mismatch.
    pub fn from_cells(cells: Vec<VoxelType>) -> Option<Self> {
        (cells.len() == Self::VOLUME).then(|| Self {
            cells: cells.into_boxed_slice(),
        })
    }

    #[inline]
    pub const fn idx(x: usize, y: usize, z: usize) -> usize {
        (x * Self::HEIGHT + y) * Self::SIZE + z
    }

    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && z >= 0
            && y >= 0
            && (x as usize) < Self::SIZE
            && (y as usize) < Self::HEIGHT
            && (z as usize) < Self::SIZE
    }

    /// Checked read; out-of-range coordinates return `None`.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<VoxelType> {
        if !Self::in_bounds(x, y, z) {
            return None;
        }
        Some(self.cells[Self::idx(x as usize, y as usize, z as usize)])
    }

    /// Checked write; returns whether the cell existed.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, v: VoxelType) -> bool {
        if !Self::in_bounds(x, y, z) {
            return false;
        }
        self.cells[Self::idx(x as usize, y as usize, z as usize)] = v;
        true
    }

    #[inline]
    pub(crate) fn get_local(&self, x: usize, y: usize, z: usize) -> VoxelType {
        self.cells[Self::idx(x, y, z)]
    }

    #[inline]
    pub(crate) fn set_local(&mut self, x: usize, y: usize, z: usize, v: VoxelType) {
        self.cells[Self::idx(x, y, z)] = v;
    }

    /// Highest y in the column whose cell satisfies `pred`.
    pub fn top_where(&self, x: usize, z: usize, pred: impl Fn(VoxelType) -> bool) -> Option<usize> {
        if x >= Self::SIZE || z >= Self::SIZE {
            return None;
        }
        (0..Self::HEIGHT).rev().find(|&y| pred(self.get_local(x, y, z)))
    }

    #[inline]
    pub fn cells(&self) -> &[VoxelType] {
        &self.cells
    }

    pub fn count(&self, v: VoxelType) -> usize {
        self.cells.iter().filter(|c| **c == v).count()
    }

    pub fn bytes(&self) -> impl ExactSizeIterator<Item = u8> + '_ {
        self.cells.iter().map(|v| v.as_u8())
    }
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::air()
    }
}

impl std::fmt::Debug for VoxelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelGrid")
            .field("solid", &self.cells.iter().filter(|v| v.is_solid()).count())
            .field("volume", &Self::VOLUME)
            .finish()
    }
}
