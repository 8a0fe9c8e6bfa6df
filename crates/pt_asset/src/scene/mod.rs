mod document;
mod encoder;
mod error;
mod mtl;
mod obj;
mod reader;

pub use document::{Corner, DocumentConfig, Face, Material, SceneDocument, Submesh};
pub use encoder::SceneEncoder;
pub use error::{Attribute, ErrorCategory, FormatError, ParseError};
pub use reader::MAX_LINE_LENGTH;
