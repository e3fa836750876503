use serde::{Deserialize, Serialize};

/// One byte per cell. The discriminants are the on-disk snapshot encoding
/// and double as atlas slots, so they must never be renumbered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum VoxelType {
    Grass = 0,
    Dirt = 1,
    Stone = 2,
    DiamondBlock = 3,
    Water = 4,
    Sand = 5,
    Wood = 6,
    Leaves = 7,
    Bedrock = 8,
    Gravel = 9,
    Snow = 10,
    GrassPlant = 11,
    Glass = 12,
    #[default]
    Air = 255,
}

impl VoxelType {
    pub const ALL: [VoxelType; 14] = [
        VoxelType::Grass,
        VoxelType::Dirt,
        VoxelType::Stone,
        VoxelType::DiamondBlock,
        VoxelType::Water,
        VoxelType::Sand,
        VoxelType::Wood,
        VoxelType::Leaves,
        VoxelType::Bedrock,
        VoxelType::Gravel,
        VoxelType::Snow,
        VoxelType::GrassPlant,
        VoxelType::Glass,
        VoxelType::Air,
    ];

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decodes a stored byte; unknown bytes are rejected rather than coerced.
    pub const fn from_u8(b: u8) -> Option<VoxelType> {
        Some(match b {
            0 => VoxelType::Grass,
            1 => VoxelType::Dirt,
            2 => VoxelType::Stone,
            3 => VoxelType::DiamondBlock,
            4 => VoxelType::Water,
            5 => VoxelType::Sand,
            6 => VoxelType::Wood,
            7 => VoxelType::Leaves,
            8 => VoxelType::Bedrock,
            9 => VoxelType::Gravel,
            10 => VoxelType::Snow,
            11 => VoxelType::GrassPlant,
            12 => VoxelType::Glass,
            255 => VoxelType::Air,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            VoxelType::Grass => "grass",
            VoxelType::Dirt => "dirt",
            VoxelType::Stone => "stone",
            VoxelType::DiamondBlock => "diamond_block",
            VoxelType::Water => "water",
            VoxelType::Sand => "sand",
            VoxelType::Wood => "wood",
            VoxelType::Leaves => "leaves",
            VoxelType::Bedrock => "bedrock",
            VoxelType::Gravel => "gravel",
            VoxelType::Snow => "snow",
            VoxelType::GrassPlant => "grass_plant",
            VoxelType::Glass => "glass",
            VoxelType::Air => "air",
        }
    }

    pub fn from_name(name: &str) -> Option<VoxelType> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Anything other than AIR and WATER occupies its cell.
    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(self, VoxelType::Air | VoxelType::Water)
    }

    /// Neighbours of this type leave the adjacent face exposed.
    #[inline]
    pub fn is_see_through(self) -> bool {
        matches!(self, VoxelType::Air | VoxelType::Water | VoxelType::Leaves)
    }

    /// Solid for the observer's collision box; plants can be walked through.
    #[inline]
    pub fn blocks_movement(self) -> bool {
        self.is_solid() && self != VoxelType::GrassPlant
    }

    /// Cells the cube mesher never emits geometry for.
    #[inline]
    pub fn is_unmeshed(self) -> bool {
        matches!(self, VoxelType::Air | VoxelType::Water | VoxelType::GrassPlant)
    }
}

impl TryFrom<u8> for VoxelType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        VoxelType::from_u8(value).ok_or(value)
    }
}

impl From<VoxelType> for u8 {
    fn from(value: VoxelType) -> Self {
        value.as_u8()
    }
}
