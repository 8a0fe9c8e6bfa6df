//! Marker values and record sizes of the encoded streams.
//!
//! The shader walks both textures texel by texel and recognises records by
//! these exact values; changing any of them breaks the consumer.

/// Opens a submesh record: `[SUBMESH_BEGIN, digest, emissive]`.
pub const SUBMESH_BEGIN: f32 = -10086.0;
/// Second texel of a submesh header: `[SUBMESH_ATTRIBUTES, 0, 0]`.
pub const SUBMESH_ATTRIBUTES: f32 = -10087.0;
/// Brackets the digest of a material record: `[MATERIAL_BEGIN, digest, MATERIAL_END]`.
pub const MATERIAL_BEGIN: f32 = -10090.0;
pub const MATERIAL_END: f32 = -10091.0;
/// Terminates both streams ("E", "N", "D").
pub const END_OF_STREAM: [f32; 3] = [-500.0, -140.0, -400.0];

pub const SUBMESH_HEADER_LEN: usize = 6;
/// Positions, texture coordinates and normals of three corners.
pub const FACE_LEN: usize = 27;
/// Header texel plus Ka, Kd, Ks and Ke.
pub const MATERIAL_RECORD_LEN: usize = 15;

/// Digests are reduced below this bound so they stay exact in an `f32`.
pub const DIGEST_BOUND: u64 = 100_000;

/// Name given to submeshes that never selected a material.
pub const DEFAULT_MATERIAL_NAME: &str = "DEFAULT";

/// Ka, Kd, Ks and Ke the shader falls back to when a submesh digest has no
/// material record.
pub const DEFAULT_MATERIAL: [f32; 12] = [
    0.0, 0.0, 0.0, // Ka
    0.725, 0.71, 0.68, // Kd
    0.0, 0.0, 0.0, // Ks
    0.0, 0.0, 0.0, // Ke
];

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stable digest of a material name (64-bit FNV-1a, reduced modulo [`DIGEST_BOUND`]).
pub fn digest(name: &str) -> u32 {
    let hash = name.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    });
    (hash % DIGEST_BOUND) as u32
}
