use proptest::prelude::*;
use strata_blocks::VoxelType;

proptest! {
    // Every byte either decodes to a type that re-encodes to itself or is rejected
    #[test]
    fn byte_decode_is_exact(b in any::<u8>()) {
        match VoxelType::from_u8(b) {
            Some(v) => prop_assert_eq!(v.as_u8(), b),
            None => prop_assert!(VoxelType::ALL.iter().all(|v| v.as_u8() != b)),
        }
    }
}

#[test]
fn all_types_have_unique_bytes_and_names() {
    for (i, a) in VoxelType::ALL.iter().enumerate() {
        for b in &VoxelType::ALL[i + 1..] {
            assert_ne!(a.as_u8(), b.as_u8());
            assert_ne!(a.name(), b.name());
        }
        assert_eq!(VoxelType::from_name(a.name()), Some(*a));
    }
}

#[test]
fn solidity_and_see_through_classes() {
    assert!(!VoxelType::Air.is_solid());
    assert!(!VoxelType::Water.is_solid());
    assert!(VoxelType::Leaves.is_solid());
    assert!(VoxelType::Leaves.is_see_through());
    assert!(!VoxelType::Glass.is_see_through());
    assert!(!VoxelType::Stone.is_see_through());
    assert!(VoxelType::GrassPlant.is_solid());
    assert!(!VoxelType::GrassPlant.blocks_movement());
    assert!(VoxelType::GrassPlant.is_unmeshed());
    assert!(!VoxelType::Leaves.is_unmeshed());
    assert_eq!(VoxelType::default(), VoxelType::Air);
    assert_eq!(VoxelType::try_from(200u8), Err(200));
}
