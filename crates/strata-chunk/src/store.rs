use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use strata_blocks::VoxelType;
use strata_geom::{Aabb, Vec3};
use strata_mesh_cpu::ChunkMeshCPU;
use strata_world::{ChunkCoord, VoxelGrid};

use crate::Chunk;
use crate::raycast::{RayHit, raycast_first_hit_with_face};

/// Snapshot of one unmeshed chunk handed to a meshing worker.
#[derive(Clone, Debug)]
pub struct MeshJob {
    pub key: u64,
    pub coord: ChunkCoord,
    pub grid: Arc<VoxelGrid>,
}

/// Resident chunks keyed by [`strata_world::chunk_key`].
#[derive(Default, Debug)]
pub struct ChunkStore {
    chunks: HashMap<u64, Chunk>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: u64) -> bool {
        self.chunks.contains_key(&key)
    }

    #[inline]
    pub fn get(&self, key: u64) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    pub fn get_coord(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord.key())
    }

    /// Inserts under the chunk's own key, returning any chunk it replaced.
    pub fn insert(&mut self, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(chunk.key(), chunk)
    }

    pub fn remove(&mut self, key: u64) -> Option<Chunk> {
        self.chunks.remove(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.chunks.keys().copied()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    /// Drops every chunk whose key is not in `keep`. Returns how many went.
    pub fn retain_keys(&mut self, keep: &HashSet<u64>) -> usize {
        let before = self.chunks.len();
        self.chunks.retain(|key, _| keep.contains(key));
        before - self.chunks.len()
    }

    /// Work list of chunks that still need a mesh, in key order.
    pub fn unmeshed(&self) -> Vec<MeshJob> {
        let mut jobs: Vec<MeshJob> = self
            .chunks
            .iter()
            .filter(|(_, c)| c.mesh.is_none())
            .map(|(&key, c)| MeshJob {
                key,
                coord: c.coord,
                grid: Arc::clone(&c.grid),
            })
            .collect();
        jobs.sort_unstable_by_key(|j| j.key);
        jobs
    }

    /// Attaches a mesh unless the chunk was evicted or already meshed.
    pub fn attach_mesh(&mut self, key: u64, mesh: ChunkMeshCPU) -> bool {
        match self.chunks.get_mut(&key) {
            Some(chunk) if chunk.mesh.is_none() => {
                chunk.mesh = Some(Arc::new(mesh));
                true
            }
            _ => false,
        }
    }

    /// Meshes of every meshed chunk, nearest to `center` first. Equal
    /// distances fall back to key order so the result is reproducible.
    pub fn meshes_by_distance(&self, center: ChunkCoord) -> Vec<Arc<ChunkMeshCPU>> {
        let mut ordered: Vec<(u64, u64, &Arc<ChunkMeshCPU>)> = self
            .chunks
            .iter()
            .filter_map(|(&key, c)| c.mesh.as_ref().map(|m| (c.coord.manhattan(center), key, m)))
            .collect();
        ordered.sort_unstable_by_key(|&(dist, key, _)| (dist, key));
        ordered.into_iter().map(|(_, _, m)| Arc::clone(m)).collect()
    }

    /// Voxel at a world block position; `None` when the chunk is not loaded
    /// or `y` is outside the world column.
    pub fn voxel_at(&self, x: i32, y: i32, z: i32) -> Option<VoxelType> {
        if y < 0 || y >= VoxelGrid::HEIGHT as i32 {
            return None;
        }
        let coord = ChunkCoord::from_block(x, z);
        let chunk = self.chunks.get(&coord.key())?;
        let (ox, oz) = coord.world_origin();
        chunk.grid.get(x.wrapping_sub(ox), y, z.wrapping_sub(oz))
    }

    #[inline]
    pub fn is_solid_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.voxel_at(x, y, z).is_some_and(VoxelType::is_solid)
    }

    /// True if any cell the box overlaps blocks movement. Unloaded chunks
    /// are treated as empty.
    pub fn collides_aabb(&self, aabb: &Aabb) -> bool {
        let ((x0, y0, z0), (x1, y1, z1)) = aabb.cell_range();
        for x in x0..=x1 {
            for z in z0..=z1 {
                for y in y0..=y1 {
                    if self.voxel_at(x, y, z).is_some_and(VoxelType::blocks_movement) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Hits anything that is not air or water.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<RayHit> {
        raycast_first_hit_with_face(origin, dir, max_dist, |x, y, z| {
            self.voxel_at(x, y, z)
                .is_some_and(|v| !matches!(v, VoxelType::Air | VoxelType::Water))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(coord: ChunkCoord, top: i32) -> Chunk {
        let mut grid = VoxelGrid::air();
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..=top {
                    grid.set(x, y, z, VoxelType::Stone);
                }
            }
        }
        Chunk::new(coord, grid)
    }

    #[test]
    fn retain_keys_reports_evictions() {
        let mut store = ChunkStore::new();
        for c in ChunkCoord::new(0, 0).square(1) {
            store.insert(Chunk::new(c, VoxelGrid::air()));
        }
        let keep: HashSet<u64> = [ChunkCoord::new(0, 0).key()].into_iter().collect();
        assert_eq!(store.retain_keys(&keep), 8);
        assert_eq!(store.len(), 1);
        assert!(store.contains(ChunkCoord::new(0, 0).key()));
    }

    #[test]
    fn attach_only_fills_empty_slots() {
        let mut store = ChunkStore::new();
        let c = ChunkCoord::new(3, -1);
        store.insert(Chunk::new(c, VoxelGrid::air()));
        assert_eq!(store.unmeshed().len(), 1);
        let mesh = ChunkMeshCPU {
            coord: c,
            ..Default::default()
        };
        assert!(store.attach_mesh(c.key(), mesh.clone()));
        assert!(!store.attach_mesh(c.key(), mesh.clone()));
        assert!(!store.attach_mesh(ChunkCoord::new(9, 9).key(), mesh));
        assert!(store.unmeshed().is_empty());
    }

    #[test]
    fn meshes_come_back_nearest_first() {
        let mut store = ChunkStore::new();
        let coords = [
            ChunkCoord::new(2, 0),
            ChunkCoord::new(0, 0),
            ChunkCoord::new(-1, 0),
            ChunkCoord::new(0, 1),
        ];
        for c in coords {
            store.insert(Chunk::new(c, VoxelGrid::air()));
            store.attach_mesh(
                c.key(),
                ChunkMeshCPU {
                    coord: c,
                    ..Default::default()
                },
            );
        }
        let order: Vec<ChunkCoord> = store
            .meshes_by_distance(ChunkCoord::new(0, 0))
            .iter()
            .map(|m| m.coord)
            .collect();
        // (-1,0) and (0,1) tie at distance 1; the smaller key wins.
        let (a, b) = (ChunkCoord::new(-1, 0), ChunkCoord::new(0, 1));
        let tied = if a.key() < b.key() { [a, b] } else { [b, a] };
        assert_eq!(order, vec![ChunkCoord::new(0, 0), tied[0], tied[1], ChunkCoord::new(2, 0)]);
    }

    #[test]
    fn voxel_queries_cross_chunk_borders() {
        let mut store = ChunkStore::new();
        store.insert(flat(ChunkCoord::new(-1, 0), 10));
        assert_eq!(store.voxel_at(-1, 10, 0), Some(VoxelType::Stone));
        assert_eq!(store.voxel_at(-16, 11, 15), Some(VoxelType::Air));
        assert_eq!(store.voxel_at(0, 5, 0), None);
        assert_eq!(store.voxel_at(-1, -1, 0), None);
        assert_eq!(store.voxel_at(-1, VoxelGrid::HEIGHT as i32, 0), None);
        assert!(store.is_solid_at(-5, 0, 3));
        assert!(!store.is_solid_at(5, 0, 3));
    }

    #[test]
    fn boxes_collide_with_ground_but_not_missing_chunks() {
        let mut store = ChunkStore::new();
        store.insert(flat(ChunkCoord::new(0, 0), 10));
        let standing = Aabb::from_feet(Vec3::new(8.0, 11.0, 8.0), 0.6, 1.8);
        assert!(!store.collides_aabb(&standing));
        let sunk = Aabb::from_feet(Vec3::new(8.0, 10.5, 8.0), 0.6, 1.8);
        assert!(store.collides_aabb(&sunk));
        let elsewhere = Aabb::from_feet(Vec3::new(40.0, 0.0, 40.0), 0.6, 1.8);
        assert!(!store.collides_aabb(&elsewhere));
    }

    #[test]
    fn plants_do_not_block_movement() {
        let mut store = ChunkStore::new();
        let mut chunk = flat(ChunkCoord::new(0, 0), 10);
        Arc::make_mut(&mut chunk.grid).set(8, 11, 8, VoxelType::GrassPlant);
        store.insert(chunk);
        let body = Aabb::from_feet(Vec3::new(8.5, 11.0, 8.5), 0.6, 1.8);
        assert!(!store.collides_aabb(&body));
        assert!(store.is_solid_at(8, 11, 8));
    }

    #[test]
    fn raycast_skips_water() {
        let mut store = ChunkStore::new();
        let mut chunk = flat(ChunkCoord::new(0, 0), 10);
        for y in 11..=20 {
            Arc::make_mut(&mut chunk.grid).set(4, y, 4, VoxelType::Water);
        }
        store.insert(chunk);
        let hit = store
            .raycast(Vec3::new(4.5, 30.5, 4.5), Vec3::DOWN, 40.0)
            .unwrap();
        assert_eq!((hit.bx, hit.by, hit.bz), (4, 10, 4));
        assert_eq!(hit.ny, 1);
        assert!(store.raycast(Vec3::new(100.5, 30.5, 4.5), Vec3::DOWN, 40.0).is_none());
    }
}
