use std::fmt;
use std::path::Path;

use bytes::Bytes;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::assets::Palette;

/// A decoded 8-bit texture: its palette indices plus the palette they index into.
///
/// Images are converted to RGBA on demand with [`to_rgba`](RasterImage::to_rgba). Pixels whose
/// index equals the transparent index, if one is set, come out fully transparent.
#[derive(Clone)]
pub struct RasterImage {
    width: u32,
    height: u32,
    indices: Bytes,
    palette: &'static Palette,
    transparent_index: Option<u8>,
}

impl RasterImage {
    /// Wraps `width * height` row-major palette indices.
    ///
    /// # Panics
    ///
    /// Panics if `indices` has the wrong length.
    pub fn new(
        width: u32,
        height: u32,
        indices: Bytes,
        palette: &'static Palette,
        transparent_index: Option<u8>,
    ) -> Self {
        assert_eq!(indices.len() as u64, u64::from(width) * u64::from(height));

        Self {
            width,
            height,
            indices,
            palette,
            transparent_index,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The palette index at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn index(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height);
        self.indices[y as usize * self.width as usize + x as usize]
    }

    /// The RGB color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.palette.rgb(self.index(x, y))
    }

    /// The palette index drawn as transparent, if any.
    pub fn transparent_index(&self) -> Option<u8> {
        self.transparent_index
    }

    /// Returns `true` if some index is marked transparent.
    pub fn is_transparent(&self) -> bool {
        self.transparent_index.is_some()
    }

    /// Expands the indices through the palette.
    pub fn to_rgba(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(self.palette.rgba(self.index(x, y), self.transparent_index))
        })
    }

    /// Writes the image in the format its extension names, PNG or TGA.
    pub fn save(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        self.to_rgba().save_with_format(path, format)
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("indices", &format!("<{} bytes>", self.indices.len()))
            .field("transparent_index", &self.transparent_index)
            .finish()
    }
}
