use std::collections::{BTreeMap, BTreeSet};

use gfx_maths::Vec3;
use log::{debug, warn};
use pt_format::{wire, SceneTextures, TextureData, RGB_CHANNELS};

use super::document::{Corner, Face, SceneDocument};

/// Packs a [`SceneDocument`] into the float streams read by the shader.
///
/// The geometry stream is a sequence of submesh records:
///
/// ```text
/// [SUBMESH_BEGIN, digest(material), emissive] [SUBMESH_ATTRIBUTES, 0, 0]
/// per face: 3 positions, 3 texture coordinates, 3 normals (27 floats)
/// ```
///
/// The material stream is a sequence of
/// `[MATERIAL_BEGIN, digest(name), MATERIAL_END]` followed by Ka, Kd, Ks and Ke.
/// Both streams end with [`wire::END_OF_STREAM`].
#[derive(Debug, Clone, Copy)]
pub struct SceneEncoder<'a> {
    document: &'a SceneDocument,
}

impl<'a> SceneEncoder<'a> {
    pub fn new(document: &'a SceneDocument) -> Self {
        Self { document }
    }

    pub fn encode_geometry(&self) -> Vec<f32> {
        let document = self.document;
        let mut data = Vec::with_capacity(
            document.submeshes().len() * wire::SUBMESH_HEADER_LEN
                + document.face_count() * wire::FACE_LEN
                + wire::END_OF_STREAM.len(),
        );

        for submesh in document.submeshes() {
            data.extend_from_slice(&[
                wire::SUBMESH_BEGIN,
                wire::digest(&submesh.material) as f32,
                if submesh.emissive { 1.0 } else { 0.0 },
                wire::SUBMESH_ATTRIBUTES,
                0.0, // placeholder
                0.0, // placeholder
            ]);

            for face in &submesh.faces {
                self.encode_face(face, &mut data);
            }
        }

        data.extend_from_slice(&wire::END_OF_STREAM);
        debug!(
            "Encoded {} submeshes into {} floats",
            document.submeshes().len(),
            data.len()
        );
        data
    }

    fn encode_face(&self, face: &Face, data: &mut Vec<f32>) {
        let document = self.document;
        for corner in &face.corners {
            push_vec3(data, document.positions()[corner.position as usize - 1]);
        }
        push_attribute(data, face, document.texcoords(), |c| c.texcoord);
        push_attribute(data, face, document.normals(), |c| c.normal);
    }

    pub fn encode_materials(&self) -> Vec<f32> {
        let materials = self.document.materials();
        let mut data = Vec::with_capacity(
            materials.len() * wire::MATERIAL_RECORD_LEN + wire::END_OF_STREAM.len(),
        );

        for material in materials.values() {
            data.extend_from_slice(&[
                wire::MATERIAL_BEGIN,
                wire::digest(&material.name) as f32,
                wire::MATERIAL_END,
            ]);
            for colour in [material.ka, material.kd, material.ks, material.ke] {
                push_vec3(&mut data, colour);
            }
        }

        data.extend_from_slice(&wire::END_OF_STREAM);
        debug!(
            "Encoded {} materials into {} floats",
            materials.len(),
            data.len()
        );
        data
    }

    /// Pairs of distinct material names that share a digest.
    ///
    /// The shader matches submeshes to materials by digest alone, so any pair
    /// returned here makes one of the two materials unreachable.
    pub fn digest_collisions(&self) -> Vec<(String, String)> {
        let names = self
            .document
            .submeshes()
            .iter()
            .map(|s| s.material.as_str())
            .chain(self.document.materials().keys().map(String::as_str));

        let mut seen: BTreeMap<u32, &str> = BTreeMap::new();
        let mut collisions = BTreeSet::new();
        for name in names {
            let previous = *seen.entry(wire::digest(name)).or_insert(name);
            if previous != name {
                collisions.insert((previous.to_owned(), name.to_owned()));
            }
        }
        collisions.into_iter().collect()
    }

    /// Encodes both streams and pads them into square RGB textures.
    pub fn textures(&self) -> SceneTextures {
        for (a, b) in self.digest_collisions() {
            warn!(
                "Materials \"{}\" and \"{}\" share digest {}, the shader cannot tell them apart",
                a,
                b,
                wire::digest(&a)
            );
        }

        let geometry = TextureData::from_stream(self.encode_geometry(), RGB_CHANNELS);
        let materials = TextureData::from_stream(self.encode_materials(), RGB_CHANNELS);
        debug!(
            "Geometry texture {0}x{0}, material texture {1}x{1}",
            geometry.side, materials.side
        );

        SceneTextures::new(geometry, materials)
    }
}

// Writes one attribute class of a face. Whether the class is present is
// decided by the first corner alone; when it is absent all nine floats are zero.
fn push_attribute<F>(data: &mut Vec<f32>, face: &Face, pool: &[Vec3], index_of: F)
where
    F: Fn(&Corner) -> Option<u32>,
{
    if index_of(&face.corners[0]).is_none() {
        data.extend_from_slice(&[0.0; 9]);
        return;
    }

    for corner in &face.corners {
        let value = index_of(corner)
            .map(|i| pool[i as usize - 1])
            .unwrap_or_else(Vec3::zero);
        push_vec3(data, value);
    }
}

fn push_vec3(data: &mut Vec<f32>, value: Vec3) {
    data.extend_from_slice(&[value.x, value.y, value.z]);
}
