use std::io::Cursor;

use egui::{Color32, ColorImage, Pos2};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{WhiteboardError, WhiteboardResult};

/// Background color of a blank surface; the eraser paints with it too.
pub const BACKGROUND: Color32 = Color32::WHITE;

/// Fixed-size raster the user draws on.
///
/// Pixels are straight RGBA. Rendering is aliased: a pixel is either fully
/// covered by a segment or untouched, which keeps eraser strokes and PNG
/// round-trips exact.
pub struct Surface {
    pixels: RgbaImage,
    /// Bumped on every mutation so the UI knows when to re-upload the texture
    revision: u64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("revision", &self.revision)
            .finish()
    }
}

impl Surface {
    /// Create a blank surface. Zero dimensions are bumped to one pixel so the
    /// surface can always be encoded.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            pixels: RgbaImage::from_pixel(width, height, to_rgba(BACKGROUND)),
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixels.get_pixel_checked(x, y).map(|p| {
            let [r, g, b, a] = p.0;
            Color32::from_rgba_unmultiplied(r, g, b, a)
        })
    }

    /// True when every pixel is the background color
    pub fn is_blank(&self) -> bool {
        let background = to_rgba(BACKGROUND);
        self.pixels.pixels().all(|p| *p == background)
    }

    /// Reset every pixel to the background color
    pub fn blank(&mut self) {
        let background = to_rgba(BACKGROUND);
        for pixel in self.pixels.pixels_mut() {
            *pixel = background;
        }
        self.revision += 1;
    }

    /// Rasterize a round-capped segment of the given width.
    ///
    /// Coordinates outside the surface are accepted; only the covered
    /// in-bounds pixels are written.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, color: Color32, width: f32) {
        let radius = (width / 2.0).max(0.5);
        let (w, h) = (self.width() as i64, self.height() as i64);

        let min_x = ((from.x.min(to.x) - radius).floor() as i64).max(0);
        let min_y = ((from.y.min(to.y) - radius).floor() as i64).max(0);
        let max_x = ((from.x.max(to.x) + radius).ceil() as i64).min(w - 1);
        let max_y = ((from.y.max(to.y) + radius).ceil() as i64).min(h - 1);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let rgba = to_rgba(color);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_to_segment(center, from, to) <= radius {
                    self.pixels.put_pixel(x as u32, y as u32, rgba);
                }
            }
        }
        self.revision += 1;
    }

    /// Blank the surface and paint `image` with its top-left corner at the origin
    pub fn restore_from(&mut self, image: &RgbaImage) {
        self.blank();
        image::imageops::replace(&mut self.pixels, image, 0, 0);
    }

    /// Lossless PNG encoding of the full surface
    pub fn encode_png(&self) -> WhiteboardResult<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.pixels
            .write_to(&mut bytes, ImageFormat::Png)
            .map_err(WhiteboardError::Encode)?;
        Ok(bytes.into_inner())
    }

    /// Copy the pixels into an egui image for texture upload
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

/// Distance from `point` to the closed segment `start..end`
pub(crate) fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let line_vec = end - start;
    let point_vec = point - start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = start + (line_vec * t / line_len);
    (point - projection).length()
}
