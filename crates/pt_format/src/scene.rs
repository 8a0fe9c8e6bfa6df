use crate::error::Result;
use crate::texture::TextureData;
use crate::wire;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The two textures the shader samples (triangle data and material data),
/// plus the material bound to submeshes whose digest has no record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneTextures {
    pub geometry: TextureData,
    pub materials: TextureData,
    /// Ka, Kd, Ks and Ke, see [`wire::DEFAULT_MATERIAL`].
    pub default_material: [f32; 12],
}

impl SceneTextures {
    /// Pairs the textures with [`wire::DEFAULT_MATERIAL`].
    pub fn new(geometry: TextureData, materials: TextureData) -> Self {
        Self {
            geometry,
            materials,
            default_material: wire::DEFAULT_MATERIAL,
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Ok(bincode::deserialize::<SceneTextures>(&bytes)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        SceneTextures::from_bytes(data)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self)?)
    }
}
