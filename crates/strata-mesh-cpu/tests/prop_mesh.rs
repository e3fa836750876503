use proptest::prelude::*;

use strata_blocks::VoxelType;
use strata_mesh_cpu::{build_chunk_mesh, merge_meshes};
use strata_world::{ChunkCoord, VoxelGrid};

fn voxel() -> impl Strategy<Value = VoxelType> {
    prop::sample::select(VoxelType::ALL.to_vec())
}

fn sparse_cells() -> impl Strategy<Value = Vec<(i32, i32, i32, VoxelType)>> {
    prop::collection::vec((0..16i32, 0..24i32, 0..16i32, voxel()), 0..64)
}

fn grid_from(cells: &[(i32, i32, i32, VoxelType)]) -> VoxelGrid {
    let mut g = VoxelGrid::air();
    for &(x, y, z, v) in cells {
        g.set(x, y, z, v);
    }
    g
}

proptest! {
    #[test]
    fn indices_stay_in_range(cells in sparse_cells(), cx in -50i32..50, cz in -50i32..50) {
        let mesh = build_chunk_mesh(&grid_from(&cells), ChunkCoord::new(cx, cz));
        prop_assert_eq!(mesh.indices.len() % 6, 0);
        let n = mesh.vertices.len() as u32;
        prop_assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn face_count_is_bounded_by_meshed_cells(cells in sparse_cells()) {
        let grid = grid_from(&cells);
        let meshed = grid.cells().iter().filter(|v| !v.is_unmeshed()).count();
        let mesh = build_chunk_mesh(&grid, ChunkCoord::new(0, 0));
        prop_assert!(mesh.indices.len() / 6 <= meshed * 6);
        if meshed == 0 {
            prop_assert!(mesh.is_empty());
        }
    }

    #[test]
    fn merge_rebases_every_chunk(a in sparse_cells(), b in sparse_cells()) {
        let ma = build_chunk_mesh(&grid_from(&a), ChunkCoord::new(0, 0));
        let mb = build_chunk_mesh(&grid_from(&b), ChunkCoord::new(1, 0));
        let merged = merge_meshes([&ma, &mb]);
        let n = merged.vertices.len() as u32;
        prop_assert!(merged.indices.iter().all(|&i| i < n));
        let base = ma.vertices.len() as u32;
        let tail: Vec<u32> = mb.indices.iter().map(|i| i + base).collect();
        prop_assert_eq!(&merged.indices[ma.indices.len()..], &tail[..]);
    }
}
