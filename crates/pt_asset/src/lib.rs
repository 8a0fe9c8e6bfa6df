pub mod manifest;
pub mod pack;
pub mod scene;
pub mod utils;

pub use manifest::{ManifestError, ObjectEntry, SceneManifest};
pub use scene::{
    Attribute, Corner, DocumentConfig, ErrorCategory, Face, FormatError, Material, ParseError,
    SceneDocument, SceneEncoder, Submesh,
};
