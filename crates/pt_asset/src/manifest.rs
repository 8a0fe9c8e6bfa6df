use serde::Deserialize;
use std::{
    io,
    path::{Path, PathBuf},
};

use crate::scene::DocumentConfig;

/// Describes which files make up a scene.
///
/// ```toml
/// name = "cornellbox"
/// material = "mat.mtl"
///
/// [[object]]
/// path = "floor.obj"
///
/// [[object]]
/// path = "light.obj"
/// emissive = true
/// ```
///
/// The first object is the base every other object is merged into. Relative
/// paths are resolved against the directory of the manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneManifest {
    /// Output file name, defaults to the manifest file stem.
    #[serde(default)]
    pub name: String,
    /// Material file used by objects that do not name their own.
    pub material: Option<PathBuf>,
    #[serde(rename = "object", default)]
    pub objects: Vec<ObjectEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectEntry {
    pub path: PathBuf,
    #[serde(default)]
    pub emissive: bool,
    pub material: Option<PathBuf>,
}

#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("Could not read manifest: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid manifest: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Manifest \"{}\" lists no objects", .0.display())]
    Empty(PathBuf),
}

impl SceneManifest {
    pub fn parse(path: &Path) -> Result<Self, ManifestError> {
        let data = std::fs::read_to_string(path)?;
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let manifest = Self::from_str_in(&data, dir, &name)?;
        if manifest.objects.is_empty() {
            return Err(ManifestError::Empty(path.into()));
        }
        Ok(manifest)
    }

    /// Parses manifest text, resolving relative paths against `dir`.
    pub fn from_str_in(data: &str, dir: &Path, default_name: &str) -> Result<Self, ManifestError> {
        let mut manifest: Self = toml::from_str(data)?;

        if manifest.name.is_empty() {
            manifest.name = default_name.into();
        }
        manifest.material = manifest.material.map(|path| dir.join(path));
        for object in &mut manifest.objects {
            object.path = dir.join(&object.path);
            object.material = object.material.take().map(|path| dir.join(path));
        }

        Ok(manifest)
    }

    /// Geometry files with the configuration to load each one with, base first.
    pub fn documents(&self) -> impl Iterator<Item = (&Path, DocumentConfig)> + '_ {
        self.objects.iter().map(move |object| {
            (
                object.path.as_path(),
                DocumentConfig {
                    material_path: object.material.clone().or_else(|| self.material.clone()),
                    emissive: object.emissive,
                },
            )
        })
    }
}
