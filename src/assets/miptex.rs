use std::fmt;

use bytes::Bytes;

use crate::assets::{Palette, RasterImage, TextureName, TRANSPARENT_INDEX};
use crate::report::Reporter;
use crate::wad::{self, Lump, WadStack};

/// Size of the header in front of a mip texture's pixel data.
pub const MIPTEX_HEADER_BYTES: usize = 40;

/// A mip texture lump: a 16-byte name, dimensions, and four mip level offsets. Only the
/// full-size level is kept.
#[derive(Clone)]
pub struct MipTexture {
    name: String,
    width: u32,
    height: u32,
    indices: Bytes,
}

impl MipTexture {
    /// Loads a mip texture from a lump.
    ///
    /// # Errors
    ///
    /// It is an error if the lump is compressed, the header is cut short, the dimensions are zero,
    /// or the full-size pixels don't fit inside the lump.
    pub fn load(lump: &Lump) -> wad::Result<Self> {
        lump.expect_uncompressed()?;

        let mut cursor = lump.cursor();
        cursor.need_or(MIPTEX_HEADER_BYTES, "truncated mip texture header")?;

        let name = cursor.name("texture name")?;
        let width = cursor.u32("width")?;
        let height = cursor.u32("height")?;
        let mut mip_offsets = [0; 4];
        for offset in &mut mip_offsets {
            *offset = cursor.u32("mip offset")?;
        }

        if width == 0 || height == 0 {
            return Err(lump.error(&format!("illegal size {}x{}", width, height)));
        }

        // Only the full-size level is read.
        let start = mip_offsets[0] as usize;
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .and_then(|count| start.checked_add(count))
            .and_then(|end| lump.data().get(start..end))
            .ok_or_else(|| {
                lump.error(&format!(
                    "truncated pixel data ({}x{} at offset {})",
                    width, height, start
                ))
            })?;

        Ok(Self {
            name,
            width,
            height,
            indices: Bytes::copy_from_slice(pixels),
        })
    }

    /// Looks `name` up in `wads` and decodes it with the Quake palette.
    ///
    /// Returns `None` if no archive yields a decodable texture; the reasons are reported.
    pub fn find_and_decode(
        wads: &WadStack,
        name: &str,
        reporter: &mut dyn Reporter,
    ) -> Option<RasterImage> {
        let transparent = TextureName::classify(name).is_transparent();

        wads.lookup(
            name,
            |lump| Ok(Self::load(lump)?.decode(Palette::quake(), transparent)),
            reporter,
        )
    }

    /// The name stored in the texture header. Usually, but not necessarily, the lump name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Builds the full-size image. If `transparent` is set, [`TRANSPARENT_INDEX`] is drawn
    /// see-through instead of with its palette color.
    pub fn decode(&self, palette: &'static Palette, transparent: bool) -> RasterImage {
        RasterImage::new(
            self.width,
            self.height,
            self.indices.clone(),
            palette,
            if transparent {
                Some(TRANSPARENT_INDEX)
            } else {
                None
            },
        )
    }
}

impl fmt::Debug for MipTexture {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} ({}x{})", self.name, self.width, self.height)
    }
}
