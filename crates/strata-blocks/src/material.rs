use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::types::VoxelType;

const TEXTURE_ROOT: &str = "Resource/Craftbuild/Texture/Block/";

/// Atlas slot sampled by the fragment stage. AIR never reaches the mesher
/// but still maps to its byte so the function stays total.
#[inline]
pub fn material_index(v: VoxelType) -> f32 {
    f32::from(v.as_u8())
}

/// Default texture file for building the atlas. AIR has no texture.
pub fn texture_path(v: VoxelType) -> &'static str {
    match v {
        VoxelType::Grass => "Resource/Craftbuild/Texture/Block/grass_block_top.png",
        VoxelType::Dirt => "Resource/Craftbuild/Texture/Block/dirt.png",
        VoxelType::Stone => "Resource/Craftbuild/Texture/Block/stone.png",
        VoxelType::DiamondBlock => "Resource/Craftbuild/Texture/Block/diamond_block.png",
        VoxelType::Water => "Resource/Craftbuild/Texture/Block/water_still.png",
        VoxelType::Sand => "Resource/Craftbuild/Texture/Block/sand.png",
        VoxelType::Wood => "Resource/Craftbuild/Texture/Block/oak_log.png",
        VoxelType::Leaves => "Resource/Craftbuild/Texture/Block/oak_leaves.png",
        // No dedicated plant sprite; the atlas reuses bedrock.
        VoxelType::Bedrock | VoxelType::GrassPlant => {
            "Resource/Craftbuild/Texture/Block/bedrock.png"
        }
        VoxelType::Gravel => "Resource/Craftbuild/Texture/Block/gravel.png",
        VoxelType::Snow => "Resource/Craftbuild/Texture/Block/snow.png",
        VoxelType::Glass => "Resource/Craftbuild/Texture/Block/glass.png",
        VoxelType::Air => "",
    }
}

/// Texture table with per-voxel overrides loaded from TOML.
#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    overrides: HashMap<VoxelType, PathBuf>,
}

/// One atlas layer: the slot the mesher writes and the file that fills it.
#[derive(Clone, Debug, PartialEq)]
pub struct AtlasLayer {
    pub voxel: VoxelType,
    pub slot: f32,
    pub path: PathBuf,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture_for(&self, v: VoxelType) -> PathBuf {
        match self.overrides.get(&v) {
            Some(p) => p.clone(),
            None => PathBuf::from(texture_path(v)),
        }
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Layers in slot order, AIR excluded.
    pub fn atlas_layers(&self) -> Vec<AtlasLayer> {
        let mut layers: Vec<AtlasLayer> = VoxelType::ALL
            .into_iter()
            .filter(|v| *v != VoxelType::Air)
            .map(|voxel| AtlasLayer {
                voxel,
                slot: material_index(voxel),
                path: self.texture_for(voxel),
            })
            .collect();
        layers.sort_by_key(|l| l.voxel.as_u8());
        layers
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        for (key, entry) in cfg.materials {
            let voxel = VoxelType::from_name(&key)
                .ok_or_else(|| format!("unknown voxel type in materials: {key}"))?;
            if voxel == VoxelType::Air {
                return Err("air has no texture".into());
            }
            let path = match entry {
                MaterialEntry::Path(p) => PathBuf::from(p),
                MaterialEntry::Detail { file, root } => {
                    let root = root.unwrap_or_else(|| TEXTURE_ROOT.to_string());
                    Path::new(&root).join(file)
                }
            };
            catalog.overrides.insert(voxel, path);
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[derive(Deserialize)]
pub struct MaterialsConfig {
    #[serde(default)]
    pub materials: HashMap<String, MaterialEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    // grass = "textures/custom_grass.png"
    Path(String),
    // grass = { file = "grass_block_top.png", root = "packs/hd/" }
    Detail { file: String, root: Option<String> },
}
