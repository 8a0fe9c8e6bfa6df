use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use gfx_maths::Vec3;
use log::{debug, info};
use pt_format::wire;

use super::{
    error::{Attribute, FormatError, ParseError},
    mtl, obj,
};

/// One corner of a face: a 1-based position index plus optional 1-based
/// texture coordinate and normal indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Corner {
    pub position: u32,
    pub texcoord: Option<u32>,
    pub normal: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Face {
    pub corners: [Corner; 3],
}

/// Faces sharing one material binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Submesh {
    pub material: String,
    pub emissive: bool,
    pub faces: Vec<Face>,
}

impl Submesh {
    pub fn new(material: &str, emissive: bool) -> Self {
        Self {
            material: material.into(),
            emissive,
            faces: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub name: String,
    pub ka: Vec3,
    pub kd: Vec3,
    pub ks: Vec3,
    /// Never written by the parser; kept so the record layout has room for it.
    pub ke: Vec3,
}

impl Material {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// How a document is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Material file parsed when the geometry file contains `mtllib`.
    pub material_path: Option<PathBuf>,
    /// Marks every submesh of the document as a light source.
    pub emissive: bool,
}

// amount every index of a merged-in or appended file is shifted by
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct IndexOffsets {
    position: u32,
    texcoord: u32,
    normal: u32,
}

impl Corner {
    pub(super) fn shifted(self, offsets: IndexOffsets) -> Self {
        Self {
            position: self.position + offsets.position,
            texcoord: self.texcoord.map(|i| i + offsets.texcoord),
            normal: self.normal.map(|i| i + offsets.normal),
        }
    }
}

/// A parsed scene: shared vertex pools, submeshes indexing into them and the
/// materials they are bound to.
#[derive(Debug, Clone, Default)]
pub struct SceneDocument {
    config: DocumentConfig,
    pub(super) positions: Vec<Vec3>,
    pub(super) texcoords: Vec<Vec3>,
    pub(super) normals: Vec<Vec3>,
    pub(super) submeshes: Vec<Submesh>,
    pub(super) materials: BTreeMap<String, Material>,
}

impl SceneDocument {
    pub fn new(config: DocumentConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Shorthand for a document loaded from `path` with `config`.
    pub fn load(path: &Path, config: DocumentConfig) -> Result<Self, ParseError> {
        let mut document = Self::new(config);
        document.parse(path)?;
        Ok(document)
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Parses a Wavefront geometry file into this document.
    ///
    /// A `mtllib` directive loads the configured material file; the path
    /// named in the directive itself is not used.
    ///
    /// Indices in the file are relative to the file. Parsing into a document
    /// that already holds vertices appends, shifting them like [`merge`](Self::merge).
    pub fn parse(&mut self, path: &Path) -> Result<(), ParseError> {
        info!("Loading geometry: {}", path.display());
        obj::parse(self, path)?;
        debug!(
            "Loaded {}: {} positions, {} texture coordinates, {} normals, {} submeshes",
            path.display(),
            self.positions.len(),
            self.texcoords.len(),
            self.normals.len(),
            self.submeshes.len()
        );
        Ok(())
    }

    /// Parses a Wavefront material file into this document's material map.
    pub fn parse_material(&mut self, path: &Path) -> Result<(), ParseError> {
        info!("Loading materials: {}", path.display());
        mtl::parse(self, path)
    }

    // resolves `mtllib` found at `line` of `path`
    pub(super) fn load_material_library(
        &mut self,
        path: &Path,
        line: usize,
    ) -> Result<(), ParseError> {
        let material_path = match &self.config.material_path {
            Some(material_path) => material_path.clone(),
            None => {
                return Err(ParseError::MaterialNotConfigured {
                    path: path.into(),
                    line,
                })
            }
        };

        self.parse_material(&material_path)
            .map_err(|source| ParseError::Material {
                path: path.into(),
                line,
                source: Box::new(source),
            })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn texcoords(&self) -> &[Vec3] {
        &self.texcoords
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn submeshes(&self) -> &[Submesh] {
        &self.submeshes
    }

    /// Materials by name, iterated in ascending name order.
    pub fn materials(&self) -> &BTreeMap<String, Material> {
        &self.materials
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    pub fn face_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.faces.len()).sum()
    }

    // current pool sizes, i.e. the shift for indices of a file appended now
    pub(super) fn pool_offsets(&self) -> IndexOffsets {
        IndexOffsets {
            position: self.positions.len() as u32,
            texcoord: self.texcoords.len() as u32,
            normal: self.normals.len() as u32,
        }
    }

    // opens a new submesh and returns its index
    pub(super) fn open_submesh(&mut self, material: &str) -> usize {
        self.submeshes
            .push(Submesh::new(material, self.config.emissive));
        self.submeshes.len() - 1
    }

    pub(super) fn open_default_submesh(&mut self) -> usize {
        self.open_submesh(wire::DEFAULT_MATERIAL_NAME)
    }

    // opens (or replaces) the material called `name`
    pub(super) fn define_material(&mut self, name: &str) {
        if self
            .materials
            .insert(name.into(), Material::new(name))
            .is_some()
        {
            debug!("Material \"{}\" redefined, dropping the earlier definition", name);
        }
    }

    /// Checks every corner of `face` against the pools as they are now.
    pub(super) fn check_face(&self, face: &Face) -> Result<(), FormatError> {
        let first = &face.corners[0];
        for corner in &face.corners[1..] {
            if corner.texcoord.is_some() != first.texcoord.is_some() {
                return Err(FormatError::MixedAttributes(Attribute::TexCoord));
            }
            if corner.normal.is_some() != first.normal.is_some() {
                return Err(FormatError::MixedAttributes(Attribute::Normal));
            }
        }

        for corner in &face.corners {
            check_index(Attribute::Position, Some(corner.position), self.positions.len())?;
            check_index(Attribute::TexCoord, corner.texcoord, self.texcoords.len())?;
            check_index(Attribute::Normal, corner.normal, self.normals.len())?;
        }
        Ok(())
    }

    /// Appends `other`'s pools, submeshes and materials to this document.
    ///
    /// Corner indices of the appended submeshes are shifted by the size each
    /// pool had before the merge, so they keep pointing at the same vertices.
    /// Materials of `other` replace same-named materials of `self`.
    pub fn merge(&mut self, other: &SceneDocument) {
        let offsets = self.pool_offsets();

        self.positions.extend_from_slice(&other.positions);
        self.texcoords.extend_from_slice(&other.texcoords);
        self.normals.extend_from_slice(&other.normals);

        self.submeshes.extend(other.submeshes.iter().map(|submesh| Submesh {
            material: submesh.material.clone(),
            emissive: submesh.emissive,
            faces: submesh
                .faces
                .iter()
                .map(|face| Face {
                    corners: face.corners.map(|corner| corner.shifted(offsets)),
                })
                .collect(),
        }));

        for (name, material) in &other.materials {
            self.materials.insert(name.clone(), material.clone());
        }

        debug!(
            "Merged {} submeshes, offsets {:?}",
            other.submeshes.len(),
            offsets
        );
    }
}

fn check_index(attribute: Attribute, index: Option<u32>, len: usize) -> Result<(), FormatError> {
    match index {
        Some(index) if index == 0 || index as usize > len => Err(FormatError::IndexOutOfRange {
            attribute,
            index,
            len,
        }),
        _ => Ok(()),
    }
}
