use strata_blocks::{VoxelType, material_index};
use strata_world::{ChunkCoord, VoxelGrid};

use crate::chunk::ChunkMeshCPU;
use crate::face::Face;
use crate::mesh_build::MeshBuild;
use crate::vertex::{LEAF_TINT, WHITE};

/// Tint and atlas slot for one face of `v`.
///
/// Tops keep their own texture and tint grass and leaves. Sides and bottoms
/// tint only leaves, and grass shows dirt there.
#[inline]
pub fn face_material(v: VoxelType, face: Face) -> ([f32; 3], f32) {
    if face.is_top() {
        let tint = match v {
            VoxelType::Grass | VoxelType::Leaves => LEAF_TINT,
            _ => WHITE,
        };
        return (tint, material_index(v));
    }
    let tint = if v == VoxelType::Leaves { LEAF_TINT } else { WHITE };
    let slot = match v {
        VoxelType::Grass => material_index(VoxelType::Dirt),
        other => material_index(other),
    };
    (tint, slot)
}

/// A neighbour that draws nothing itself must not hide the face behind it.
#[inline]
fn reveals(n: VoxelType) -> bool {
    n.is_see_through() || n.is_unmeshed()
}

/// Emits a face wherever a meshed cell borders a see-through cell or the
/// edge of its own chunk. Neighbouring chunks are never consulted.
pub fn build_chunk_mesh(grid: &VoxelGrid, coord: ChunkCoord) -> ChunkMeshCPU {
    const S: i32 = VoxelGrid::SIZE as i32;
    const H: i32 = VoxelGrid::HEIGHT as i32;
    let cells = grid.cells();
    let (ox, oz) = coord.world_origin();
    let mut mb = MeshBuild::new();
    mb.reserve_quads(4 * VoxelGrid::SIZE * VoxelGrid::SIZE);

    for x in 0..S {
        for y in 0..H {
            for z in 0..S {
                let v = cells[VoxelGrid::idx(x as usize, y as usize, z as usize)];
                if v.is_unmeshed() {
                    continue;
                }
                let origin = [ox.wrapping_add(x) as f32, y as f32, oz.wrapping_add(z) as f32];
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                    let exposed = !VoxelGrid::in_bounds(nx, ny, nz)
                        || reveals(cells[VoxelGrid::idx(nx as usize, ny as usize, nz as usize)]);
                    if exposed {
                        let (tint, slot) = face_material(v, face);
                        mb.add_face(face, origin, tint, slot);
                    }
                }
            }
        }
    }

    let (vertices, indices) = mb.into_parts();
    log::trace!(
        target: "mesh",
        "chunk ({}, {}): {} vertices, {} indices",
        coord.cx,
        coord.cz,
        vertices.len(),
        indices.len()
    );
    ChunkMeshCPU {
        coord,
        vertices,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_sides_use_dirt() {
        let dirt = material_index(VoxelType::Dirt);
        let grass = material_index(VoxelType::Grass);
        assert_eq!(face_material(VoxelType::Grass, Face::Top), (LEAF_TINT, grass));
        for face in [Face::Bottom, Face::North, Face::South, Face::East, Face::West] {
            assert_eq!(face_material(VoxelType::Grass, face), (WHITE, dirt));
        }
    }

    #[test]
    fn leaves_are_tinted_everywhere() {
        let slot = material_index(VoxelType::Leaves);
        for face in Face::ALL {
            assert_eq!(face_material(VoxelType::Leaves, face), (LEAF_TINT, slot));
        }
    }

    #[test]
    fn plain_blocks_are_white() {
        for face in Face::ALL {
            let (tint, slot) = face_material(VoxelType::Stone, face);
            assert_eq!(tint, WHITE);
            assert_eq!(slot, material_index(VoxelType::Stone));
        }
    }
}
