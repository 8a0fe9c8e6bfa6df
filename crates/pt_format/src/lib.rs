pub mod error;
pub mod scene;
pub mod texture;
pub mod wire;

pub use error::{Result, StorageError};
pub use scene::SceneTextures;
pub use texture::{pad_to_square, TextureData, RGB_CHANNELS};
