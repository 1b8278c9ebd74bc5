use std::sync::Arc;

use image::RgbaImage;

use crate::error::{WhiteboardError, WhiteboardResult};
use crate::surface::Surface;
use crate::util::time;

/// Immutable PNG copy of the whole surface at one instant.
///
/// Cloning is cheap: the encoded bytes are shared.
#[derive(Clone)]
pub struct Snapshot {
    png: Arc<[u8]>,
    size: [u32; 2],
    taken_at: f64,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("size", &self.size)
            .field("encoded_bytes", &self.png.len())
            .field("taken_at", &self.taken_at)
            .finish()
    }
}

impl Snapshot {
    /// Encode the current contents of `surface`
    pub fn capture(surface: &Surface) -> WhiteboardResult<Self> {
        let png = surface.encode_png()?;
        Ok(Self {
            png: png.into(),
            size: surface.size(),
            taken_at: time::current_time_secs(),
        })
    }

    /// Decode back to pixels. Fails if the bytes do not describe an image of
    /// the recorded size.
    pub fn decode(&self) -> WhiteboardResult<RgbaImage> {
        let image = image::load_from_memory_with_format(&self.png, image::ImageFormat::Png)
            .map_err(WhiteboardError::Decode)?
            .to_rgba8();

        let actual = [image.width(), image.height()];
        if actual != self.size {
            return Err(WhiteboardError::SizeMismatch {
                expected: self.size,
                actual,
            });
        }
        Ok(image)
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    /// Seconds timestamp of the capture (see `util::time`)
    pub fn taken_at(&self) -> f64 {
        self.taken_at
    }

    pub fn encoded_len(&self) -> usize {
        self.png.len()
    }

    pub fn as_png(&self) -> &[u8] {
        &self.png
    }

    /// Wrap arbitrary bytes, valid PNG or not
    #[cfg(test)]
    pub(crate) fn from_png_bytes(png: &[u8], size: [u32; 2]) -> Self {
        Self {
            png: Arc::from(png),
            size,
            taken_at: 0.0,
        }
    }
}
