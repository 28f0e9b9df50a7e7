pub mod builtin;

use std::fmt;
use std::sync::Arc;

use crate::error::VgaError;

pub use builtin::FontSet;

pub const GLYPH_COUNT: usize = 256;

/// An immutable 256-glyph bitmap font.
///
/// Each glyph is `height` row bytes, most significant bit leftmost. A
/// 9-pixel wide font renders the ninth column in the background color.
/// Cloning shares the glyph bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Font {
    glyphs: Arc<[u8]>,
    width: usize,
    height: usize,
}

impl Font {
    pub fn new(glyphs: impl Into<Arc<[u8]>>, width: usize, height: usize) -> Result<Self, VgaError> {
        let glyphs = glyphs.into();
        if width != 8 && width != 9 {
            return Err(VgaError::invalid(format!("font width must be 8 or 9, got {}", width)));
        }
        if height == 0 {
            return Err(VgaError::invalid("font height must be at least 1"));
        }
        let Some(needed) = height.checked_mul(GLYPH_COUNT) else {
            return Err(VgaError::invalid(format!("font height {} is too large", height)));
        };
        if glyphs.len() < needed {
            return Err(VgaError::invalid(format!(
                "{} glyph bytes is too short for 256 glyphs of {} rows",
                glyphs.len(),
                height
            )));
        }

        Ok(Font {
            glyphs,
            width,
            height,
        })
    }

    /// The raw row bytes of one glyph.
    pub fn glyph_rows(&self, code: u8) -> &[u8] {
        let start = self.height * code as usize;
        &self.glyphs[start..start + self.height]
    }

    /// Rasterizes `code` into `width * height` palette indices.
    pub fn glyph(&self, code: u8, fg: u8, bg: u8) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.width * self.height);

        for &row in self.glyph_rows(code) {
            for bit in (0..8).rev() {
                pixels.push(if row >> bit & 1 == 1 { fg } else { bg });
            }
            if self.width == 9 {
                pixels.push(bg);
            }
        }

        pixels
    }

    /// `(width, height)` of one glyph cell in pixels.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
