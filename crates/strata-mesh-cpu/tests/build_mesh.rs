use hashbrown::HashSet;

use strata_blocks::{VoxelType, material_index};
use strata_mesh_cpu::{ChunkMeshCPU, LEAF_TINT, Vertex, build_chunk_mesh, merge_meshes};
use strata_world::{ChunkCoord, VoxelGrid, World};

fn with_cells(cells: &[(i32, i32, i32, VoxelType)]) -> VoxelGrid {
    let mut grid = VoxelGrid::air();
    for &(x, y, z, v) in cells {
        assert!(grid.set(x, y, z, v));
    }
    grid
}

fn faces(mesh: &ChunkMeshCPU) -> usize {
    assert_eq!(mesh.indices.len() % 6, 0);
    mesh.indices.len() / 6
}

fn assert_indices_in_range(vertices: &[Vertex], indices: &[u32]) {
    for &i in indices {
        assert!((i as usize) < vertices.len(), "index {i} >= {}", vertices.len());
    }
}

#[test]
fn empty_grid_has_no_geometry() {
    let mesh = build_chunk_mesh(&VoxelGrid::air(), ChunkCoord::new(0, 0));
    assert!(mesh.is_empty());
    assert!(mesh.vertices.is_empty());
}

#[test]
fn water_only_grid_has_no_geometry() {
    let mesh = build_chunk_mesh(&VoxelGrid::filled(VoxelType::Water), ChunkCoord::new(2, 2));
    assert!(mesh.is_empty());
}

#[test]
fn lone_block_shows_six_faces() {
    let grid = with_cells(&[(5, 100, 5, VoxelType::Stone)]);
    let mesh = build_chunk_mesh(&grid, ChunkCoord::new(0, 0));
    assert_eq!(mesh.indices.len(), 36);
    assert!(mesh.vertices.len() <= 24);
    assert_indices_in_range(&mesh.vertices, &mesh.indices);
}

#[test]
fn chunks_at_the_edge_of_the_range_still_mesh() {
    let grid = with_cells(&[(15, 10, 15, VoxelType::Stone)]);
    let mesh = build_chunk_mesh(&grid, ChunkCoord::new(i32::MAX, i32::MIN));
    assert_eq!(faces(&mesh), 6);
    assert_indices_in_range(&mesh.vertices, &mesh.indices);
}

#[test]
fn shared_side_is_culled() {
    let grid = with_cells(&[(5, 100, 5, VoxelType::Stone), (6, 100, 5, VoxelType::Stone)]);
    let mesh = build_chunk_mesh(&grid, ChunkCoord::new(0, 0));
    assert_eq!(faces(&mesh), 10);
}

#[test]
fn see_through_neighbours_expose_faces() {
    // Stone keeps all six faces against leaves; leaves lose the face touching stone.
    let grid = with_cells(&[(5, 100, 5, VoxelType::Stone), (6, 100, 5, VoxelType::Leaves)]);
    let mesh = build_chunk_mesh(&grid, ChunkCoord::new(0, 0));
    assert_eq!(faces(&mesh), 11);
}

#[test]
fn plants_are_skipped_and_do_not_hide_the_ground() {
    let grid = with_cells(&[(5, 100, 5, VoxelType::Grass), (5, 101, 5, VoxelType::GrassPlant)]);
    let mesh = build_chunk_mesh(&grid, ChunkCoord::new(0, 0));
    assert_eq!(faces(&mesh), 6);
    assert!(mesh.vertices.iter().all(|v| v.position[1] <= 101.0));
}

#[test]
fn border_faces_are_always_emitted() {
    // A full grid still shows its outer shell because neighbours are never read.
    let mesh = build_chunk_mesh(&VoxelGrid::filled(VoxelType::Stone), ChunkCoord::new(0, 0));
    let s = VoxelGrid::SIZE;
    let h = VoxelGrid::HEIGHT;
    assert_eq!(faces(&mesh), 2 * s * s + 4 * s * h);
    assert_indices_in_range(&mesh.vertices, &mesh.indices);
}

#[test]
fn positions_are_world_space() {
    let coord = ChunkCoord::new(-2, 3);
    let grid = with_cells(&[(0, 10, 0, VoxelType::Stone)]);
    let mesh = build_chunk_mesh(&grid, coord);
    let (ox, oz) = coord.world_origin();
    for v in &mesh.vertices {
        let [x, y, z] = v.position;
        assert!(x == ox as f32 || x == (ox + 1) as f32);
        assert!(y == 10.0 || y == 11.0);
        assert!(z == oz as f32 || z == (oz + 1) as f32);
    }
}

#[test]
fn grass_top_is_tinted_and_sides_use_dirt() {
    let grid = with_cells(&[(5, 100, 5, VoxelType::Grass)]);
    let mesh = build_chunk_mesh(&grid, ChunkCoord::new(0, 0));
    let grass = material_index(VoxelType::Grass);
    let dirt = material_index(VoxelType::Dirt);
    let top: Vec<&Vertex> = mesh
        .indices
        .iter()
        .take(6)
        .map(|&i| &mesh.vertices[i as usize])
        .collect();
    assert!(top.iter().all(|v| v.material_index == grass && v.tint == LEAF_TINT));
    assert!(top.iter().all(|v| v.position[1] == 101.0));
    for &i in &mesh.indices[6..] {
        let v = &mesh.vertices[i as usize];
        assert_eq!(v.material_index, dirt);
        assert_eq!(v.tint, [1.0, 1.0, 1.0]);
    }
}

#[test]
fn stored_vertices_are_unique() {
    let world = World::new(42);
    let coord = ChunkCoord::new(1, -1);
    let grid = world.generate_chunk(coord);
    let mesh = build_chunk_mesh(&grid, coord);
    assert!(!mesh.is_empty());
    let keys: HashSet<_> = mesh.vertices.iter().map(|v| v.key()).collect();
    assert_eq!(keys.len(), mesh.vertices.len());
    assert_indices_in_range(&mesh.vertices, &mesh.indices);
}

#[test]
fn merged_generated_chunks_keep_valid_indices() {
    let world = World::new(7);
    let meshes: Vec<ChunkMeshCPU> = ChunkCoord::new(0, 0)
        .square(1)
        .map(|c| build_chunk_mesh(&world.generate_chunk(c), c))
        .collect();
    let merged = merge_meshes(&meshes);
    let total_v: usize = meshes.iter().map(|m| m.vertices.len()).sum();
    let total_i: usize = meshes.iter().map(|m| m.indices.len()).sum();
    assert_eq!(merged.vertices.len(), total_v);
    assert_eq!(merged.indices.len(), total_i);
    assert_eq!(merged.chunks, 9);
    assert_indices_in_range(&merged.vertices, &merged.indices);
}
