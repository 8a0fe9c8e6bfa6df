use serde::{Deserialize, Serialize};

/// Channel count of an `RGB32F` texel.
pub const RGB_CHANNELS: u32 = 3;

/// Zero-pads `buffer` so it fills a square grid of `channels`-wide cells.
///
/// Returns the padded buffer and the side length of the grid. The side is the
/// smallest integer whose square holds `buffer.len() / channels` cells, so any
/// stream can be uploaded as a square texture regardless of how many records
/// were written into it.
///
/// # Panics
///
/// Panics if `channels` is zero.
pub fn pad_to_square(mut buffer: Vec<f32>, channels: usize) -> (Vec<f32>, usize) {
    assert_ne!(channels, 0, "a texel needs at least one channel");

    let cells = (buffer.len() + channels - 1) / channels;
    let mut side = (cells as f64).sqrt().ceil() as usize;
    if side * side < cells {
        side += 1;
    }

    buffer.resize(side * side * channels, 0.0);
    (buffer, side)
}

/// A square float texture, stored row by row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureData {
    pub side: u32,
    pub channels: u32,
    pub data: Vec<f32>,
}

impl TextureData {
    /// Pads an encoded stream into a square texture.
    pub fn from_stream(stream: Vec<f32>, channels: u32) -> Self {
        let (data, side) = pad_to_square(stream, channels as usize);
        Self {
            side: side as u32,
            channels,
            data,
        }
    }

    /// Number of texels in the texture.
    pub fn cells(&self) -> usize {
        (self.side * self.side) as usize
    }

    /// Floats making up one row of texels.
    pub fn row_len(&self) -> usize {
        (self.side * self.channels) as usize
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.row_len().max(1))
    }

    /// The channels of the texel in column `x` of row `y`.
    pub fn texel(&self, x: u32, y: u32) -> Option<&[f32]> {
        if x >= self.side || y >= self.side {
            return None;
        }
        let channels = self.channels as usize;
        let start = (y as usize * self.side as usize + x as usize) * channels;
        self.data.get(start..start + channels)
    }
}
