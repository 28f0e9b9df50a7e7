//! Stock fonts for the standard modes.
//!
//! The glyphs come from the public-domain `font8x8` tables, laid out in code
//! page 437 order. The 14 and 16 row fonts are the same shapes stretched
//! vertically, so every mode has a complete 256-glyph set without shipping
//! ROM dumps. Real ROM dumps can be loaded with [`FontSet::from_rom`].

use std::sync::{Arc, LazyLock};

use font8x8::{BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS, UnicodeFonts};

use super::{Font, GLYPH_COUNT};
use crate::error::VgaError;

#[rustfmt::skip]
const CP437: [char; GLYPH_COUNT] = [
    '\0', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '◙', '♂', '♀', '♪', '♫', '☼',
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
    ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '\\', ']', '^', '_',
    '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '{', '|', '}', '~', '⌂',
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
];

/// One 8x8 glyph per code, MSB leftmost. Missing shapes stay blank.
fn base_glyphs() -> Vec<[u8; 8]> {
    CP437
        .iter()
        .map(|&c| {
            let rows = BASIC_FONTS
                .get(c)
                .or_else(|| LATIN_FONTS.get(c))
                .or_else(|| BOX_FONTS.get(c))
                .or_else(|| BLOCK_FONTS.get(c))
                .or_else(|| GREEK_FONTS.get(c))
                .unwrap_or([0; 8]);
            // font8x8 stores the leftmost pixel in bit 0
            rows.map(u8::reverse_bits)
        })
        .collect()
}

/// Nearest-row vertical scaling of every glyph to `height` rows.
fn stretch(glyphs: &[[u8; 8]], height: usize) -> Arc<[u8]> {
    glyphs
        .iter()
        .flat_map(|rows| (0..height).map(move |row| rows[row * 8 / height]))
        .collect()
}

static BUILTIN: LazyLock<FontSet> = LazyLock::new(|| {
    let glyphs = base_glyphs();
    let rows_8 = stretch(&glyphs, 8);
    let rows_14 = stretch(&glyphs, 14);
    let rows_16 = stretch(&glyphs, 16);

    log::debug!("built stock fonts from {} base glyphs", glyphs.len());

    FontSet {
        vga_8x8: Font { glyphs: rows_8, width: 8, height: 8 },
        ega_8x14: Font { glyphs: rows_14, width: 8, height: 14 },
        vga_8x16: Font { glyphs: rows_16.clone(), width: 8, height: 16 },
        vga_9x16: Font { glyphs: rows_16, width: 9, height: 16 },
    }
});

/// The four character generators the standard modes draw with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSet {
    pub vga_8x8: Font,
    pub ega_8x14: Font,
    pub vga_8x16: Font,
    /// Shares its glyph rows with `vga_8x16`.
    pub vga_9x16: Font,
}

impl FontSet {
    pub fn builtin() -> FontSet {
        BUILTIN.clone()
    }

    /// Builds the set from raw ROM dumps of 2048, 3584 and 4096 bytes.
    pub fn from_rom(
        rom_8x8: impl Into<Arc<[u8]>>,
        rom_8x14: impl Into<Arc<[u8]>>,
        rom_8x16: impl Into<Arc<[u8]>>,
    ) -> Result<FontSet, VgaError> {
        let rom_8x16 = rom_8x16.into();
        Ok(FontSet {
            vga_8x8: Font::new(rom_8x8, 8, 8)?,
            ega_8x14: Font::new(rom_8x14, 8, 14)?,
            vga_8x16: Font::new(rom_8x16.clone(), 8, 16)?,
            vga_9x16: Font::new(rom_8x16, 9, 16)?,
        })
    }
}
