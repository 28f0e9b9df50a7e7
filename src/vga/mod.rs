pub mod clip;
pub mod mode;
pub mod palette;

use crate::color::Color;
use crate::error::VgaError;
use crate::font::Font;
use crate::sprite::Sprite;
use crate::surface::Surface;
use mode::{Mode, ModeKind, ModeTable};
use palette::EGA_PALETTE;

/// Tables a device reads when switching modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VgaConfig {
    pub modes: ModeTable,
    /// Loaded into the low palette slots on every reset.
    pub default_palette: Vec<Color>,
}

impl Default for VgaConfig {
    fn default() -> Self {
        VgaConfig {
            modes: ModeTable::default(),
            default_palette: EGA_PALETTE.to_vec(),
        }
    }
}

/// An indexed-color display adapter.
///
/// Owns the framebuffer (one palette index per pixel, row-major) and the
/// palette for the current mode, and resolves both into a true-color frame
/// on [`Vga::show`]. Coordinates and palette indices are bounds-checked:
/// out-of-range arguments are rejected with [`VgaError::OutOfRange`] before
/// anything is written. Sprite blits are the exception and clip instead.
pub struct Vga<S: Surface> {
    // Declared before `surface` so it is dropped first.
    texture: Option<S::Texture>,
    surface: S,
    config: VgaConfig,

    mode: Mode,
    kind: ModeKind,
    width: usize,
    height: usize,
    num_colors: usize,

    vram: Vec<u8>,
    palette: Vec<Color>,
    font: Font,

    columns: usize,
    rows: usize,
    cursor_col: usize,
    cursor_row: usize,

    frame: Vec<u32>,
}

impl<S: Surface> Vga<S> {
    pub fn new(surface: S, mode: Mode) -> Result<Self, VgaError> {
        Self::with_config(surface, mode, VgaConfig::default())
    }

    pub fn with_config(mut surface: S, mode: Mode, config: VgaConfig) -> Result<Self, VgaError> {
        let info = config.modes.lookup(mode)?.clone();
        let texture = surface.create_texture(info.width, info.height)?;
        let (font_width, font_height) = info.font.size();

        let mut vga = Vga {
            texture: Some(texture),
            surface,
            mode,
            kind: info.kind,
            width: info.width,
            height: info.height,
            num_colors: info.num_colors,
            vram: vec![0; info.width * info.height],
            palette: vec![Color::BLACK; info.num_colors],
            columns: info.width / font_width,
            rows: info.height / font_height,
            font: info.font,
            cursor_col: 0,
            cursor_row: 0,
            frame: Vec::with_capacity(info.width * info.height),
            config,
        };
        vga.reset_palette();

        log::info!(
            "video mode {} ({}x{}, {} colors)",
            mode,
            vga.width,
            vga.height,
            vga.num_colors
        );
        Ok(vga)
    }

    /// Switches to `mode`, discarding the framebuffer and resetting the
    /// palette, font and cursor.
    ///
    /// An unknown mode fails before anything changes. The old texture is
    /// released before the new one is created; if creation fails the device
    /// keeps its previous mode with no texture, and [`Vga::show`] reports
    /// the failure until a mode switch succeeds.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), VgaError> {
        let info = self.config.modes.lookup(mode)?.clone();

        if let Some(old) = self.texture.take() {
            self.surface.release_texture(old);
            log::debug!("released {}x{} texture", self.width, self.height);
        }
        self.texture = Some(self.surface.create_texture(info.width, info.height)?);

        let (font_width, font_height) = info.font.size();
        self.mode = mode;
        self.kind = info.kind;
        self.width = info.width;
        self.height = info.height;
        self.num_colors = info.num_colors;
        self.vram = vec![0; info.width * info.height];
        self.palette = vec![Color::BLACK; info.num_colors];
        self.columns = info.width / font_width;
        self.rows = info.height / font_height;
        self.font = info.font;
        self.cursor_col = 0;
        self.cursor_row = 0;
        self.frame = Vec::with_capacity(info.width * info.height);
        self.reset_palette();

        log::info!(
            "video mode {} ({}x{}, {} colors)",
            mode,
            self.width,
            self.height,
            self.num_colors
        );
        Ok(())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn kind(&self) -> ModeKind {
        self.kind
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    pub fn vram(&self) -> &[u8] {
        &self.vram
    }

    /// The frame resolved by the last [`Vga::show`], ARGB8888.
    pub fn frame(&self) -> &[u32] {
        &self.frame
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn texture_mut(&mut self) -> Option<&mut S::Texture> {
        self.texture.as_mut()
    }

    // ---- palette ----

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Overwrites the palette from index 0. Entries past `colors` keep their
    /// current values.
    pub fn set_palette(&mut self, colors: &[Color]) -> Result<(), VgaError> {
        if colors.len() > self.palette.len() {
            return Err(VgaError::invalid(format!(
                "{} colors do not fit a {} entry palette",
                colors.len(),
                self.palette.len()
            )));
        }
        self.palette[..colors.len()].copy_from_slice(colors);
        Ok(())
    }

    pub fn set_color(&mut self, index: usize, color: Color) -> Result<(), VgaError> {
        let limit = self.palette.len();
        let slot = self
            .palette
            .get_mut(index)
            .ok_or(VgaError::out_of_range("palette index", index, limit))?;
        *slot = color;
        Ok(())
    }

    pub fn get_color(&self, index: usize) -> Result<Color, VgaError> {
        self.palette
            .get(index)
            .copied()
            .ok_or(VgaError::out_of_range("palette index", index, self.palette.len()))
    }

    pub fn reset_palette(&mut self) {
        palette::load_defaults(&mut self.palette, &self.config.default_palette);
        log::debug!("palette reset ({} entries)", self.palette.len());
    }

    /// Rotates the palette left by `n` entries; entry `n` becomes entry 0.
    pub fn rotate_palette(&mut self, n: usize) {
        let len = self.palette.len();
        self.palette.rotate_left(n % len);
    }

    // ---- framebuffer ----

    fn check_index(&self, index: u8) -> Result<(), VgaError> {
        if index as usize >= self.num_colors {
            return Err(VgaError::out_of_range(
                "palette index",
                index as usize,
                self.num_colors,
            ));
        }
        Ok(())
    }

    fn check_indices(&self, pixels: &[u8]) -> Result<(), VgaError> {
        if self.num_colors > u8::MAX as usize {
            return Ok(());
        }
        match pixels.iter().find(|&&p| p as usize >= self.num_colors) {
            Some(&bad) => Err(VgaError::out_of_range(
                "palette index",
                bad as usize,
                self.num_colors,
            )),
            None => Ok(()),
        }
    }

    fn xy_to_addr(&self, x: usize, y: usize) -> Result<usize, VgaError> {
        if x >= self.width {
            return Err(VgaError::out_of_range("x", x, self.width));
        }
        if y >= self.height {
            return Err(VgaError::out_of_range("y", y, self.height));
        }
        Ok(x + self.width * y)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, index: u8) -> Result<(), VgaError> {
        self.check_index(index)?;
        let addr = self.xy_to_addr(x, y)?;
        self.vram[addr] = index;
        Ok(())
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Result<u8, VgaError> {
        Ok(self.vram[self.xy_to_addr(x, y)?])
    }

    pub fn clear(&mut self, index: u8) -> Result<(), VgaError> {
        self.check_index(index)?;
        self.vram.fill(index);
        Ok(())
    }

    /// Replaces the whole framebuffer with `source`.
    pub fn blit(&mut self, source: &[u8]) -> Result<(), VgaError> {
        if source.len() != self.vram.len() {
            return Err(VgaError::invalid(format!(
                "full-screen blit needs {} pixels, got {}",
                self.vram.len(),
                source.len()
            )));
        }
        self.check_indices(source)?;
        self.vram.copy_from_slice(source);
        Ok(())
    }

    /// Copies the part of `sprite` that overlaps the framebuffer. A sprite
    /// entirely off-screen is a no-op.
    pub fn blit_sprite(&mut self, sprite: &Sprite) -> Result<(), VgaError> {
        let (x, y) = sprite.position();
        let (w, h) = sprite.size();
        let Some(clip) = clip::intersect(x, y, w, h, self.width, self.height) else {
            log::trace!("sprite {}x{} at ({}, {}) is off-screen", w, h, x, y);
            return Ok(());
        };

        let visible = clip.src_x..clip.src_x + clip.width;
        for row in 0..clip.height {
            self.check_indices(&sprite.row(clip.src_y + row)[visible.clone()])?;
        }

        for row in 0..clip.height {
            let src = &sprite.row(clip.src_y + row)[visible.clone()];
            let start = clip.dst_x + self.width * (clip.dst_y + row);
            self.vram[start..start + clip.width].copy_from_slice(src);
        }
        Ok(())
    }

    /// Scrolls the framebuffer up by `lines` text rows. Vacated rows are
    /// filled with index 0.
    pub fn scroll_up(&mut self, lines: usize) {
        let shift = self.scroll_pixels(lines);
        let len = self.vram.len();
        self.vram.copy_within(shift..len, 0);
        self.vram[len - shift..].fill(0);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let shift = self.scroll_pixels(lines);
        let len = self.vram.len();
        self.vram.copy_within(0..len - shift, shift);
        self.vram[..shift].fill(0);
    }

    fn scroll_pixels(&self, lines: usize) -> usize {
        let (_, font_height) = self.font.size();
        lines
            .saturating_mul(font_height)
            .min(self.height)
            * self.width
    }

    // ---- text ----

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Swaps the font used by later text output and rebuilds the cursor grid.
    pub fn set_font(&mut self, font: Font) -> Result<(), VgaError> {
        let (font_width, font_height) = font.size();
        if font_width > self.width || font_height > self.height {
            return Err(VgaError::invalid(format!(
                "{}x{} glyphs do not fit a {}x{} screen",
                font_width, font_height, self.width, self.height
            )));
        }

        self.font = font;
        self.columns = self.width / font_width;
        self.rows = self.height / font_height;
        self.cursor_col %= self.columns;
        self.cursor_row %= self.rows;
        log::debug!("font {}x{}, grid {}x{}", font_width, font_height, self.columns, self.rows);
        Ok(())
    }

    /// `(columns, rows)` of the text grid.
    pub fn grid(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_col, self.cursor_row)
    }

    /// Moves the cursor, wrapping both coordinates onto the grid.
    pub fn set_cursor(&mut self, col: usize, row: usize) {
        self.cursor_col = col % self.columns;
        self.cursor_row = row % self.rows;
    }

    fn advance_cursor(&mut self) {
        self.cursor_col += 1;
        if self.cursor_col == self.columns {
            self.cursor_col = 0;
            self.cursor_row = (self.cursor_row + 1) % self.rows;
        }
    }

    fn newline(&mut self) {
        self.cursor_col = 0;
        self.cursor_row = (self.cursor_row + 1) % self.rows;
    }

    /// Draws glyph `code` with its top-left corner at pixel `(x, y)`,
    /// clipped to the screen.
    pub fn putchar_at(&mut self, code: u8, fg: u8, bg: u8, x: i32, y: i32) -> Result<(), VgaError> {
        self.check_index(fg)?;
        self.check_index(bg)?;

        let (font_width, font_height) = self.font.size();
        let mut glyph = Sprite::from_pixels(font_width, font_height, self.font.glyph(code, fg, bg))?;
        glyph.set_position(x, y);
        self.blit_sprite(&glyph)
    }

    /// Draws glyph `code` on background 0 at the cursor and advances it.
    pub fn putchar(&mut self, code: u8, fg: u8) -> Result<(), VgaError> {
        let (font_width, font_height) = self.font.size();
        let x = (self.cursor_col * font_width) as i32;
        let y = (self.cursor_row * font_height) as i32;
        self.putchar_at(code, fg, 0, x, y)?;
        self.advance_cursor();
        Ok(())
    }

    /// Writes `text` starting at cell `(col, row)`. `'\n'` starts the next
    /// row and characters beyond code 255 print as `'?'`. The cursor is put
    /// back afterwards unless `update_cursor` is set.
    pub fn print(
        &mut self,
        text: &str,
        col: usize,
        row: usize,
        fg: u8,
        update_cursor: bool,
    ) -> Result<(), VgaError> {
        self.check_index(fg)?;

        let saved = self.cursor();
        self.set_cursor(col, row);
        for c in text.chars() {
            if c == '\n' {
                self.newline();
                continue;
            }
            let code = u8::try_from(u32::from(c)).unwrap_or(b'?');
            self.putchar(code, fg)?;
        }

        if !update_cursor {
            (self.cursor_col, self.cursor_row) = saved;
        }
        Ok(())
    }

    // ---- output ----

    /// Resolves every framebuffer index through the palette and hands the
    /// frame to the surface.
    pub fn show(&mut self) -> Result<(), VgaError> {
        let Some(texture) = self.texture.as_mut() else {
            return Err(VgaError::ResourceCreationFailed(format!(
                "no presentation texture for mode {}",
                self.mode
            )));
        };

        self.frame.clear();
        self.frame
            .extend(self.vram.iter().map(|&index| self.palette[index as usize].to_argb()));

        let pitch = self.width * size_of::<u32>();
        self.surface
            .present(texture, &self.frame, self.width, self.height, pitch)?;
        log::trace!("presented {}x{} frame", self.width, self.height);
        Ok(())
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::font::FontSet;
    use crate::surface::MemorySurface;
    use super::mode::ModeInfo;

    fn vga(mode: Mode) -> Vga<MemorySurface> {
        Vga::new(MemorySurface::new(), mode).unwrap()
    }

    #[test]
    fn test_end_to_end_mode_13h() {
        let mut vga = vga(Mode::Vga13h);
        vga.set_pixel(0, 0, 5).unwrap();
        vga.set_pixel(319, 199, 5).unwrap();
        assert_eq!(vga.get_pixel(0, 0), Ok(5));
        assert_eq!(vga.get_pixel(319, 199), Ok(5));

        vga.show().unwrap();

        let surface = vga.surface();
        assert_eq!(surface.frames_presented, 1);
        assert_eq!(surface.frame.len(), 320 * 200);
        assert_eq!((surface.width, surface.height, surface.pitch), (320, 200, 1280));
        assert_eq!(surface.frame[0], EGA_PALETTE[5].to_argb());
        assert_eq!(surface.frame[0], 0xffaa00aa);
        assert_eq!(surface.frame[320 * 200 - 1], EGA_PALETTE[5].to_argb());
        assert_eq!(surface.frame[1], 0xff000000);
    }

    #[test]
    fn test_address_arithmetic() {
        let mut vga = vga(Mode::Ega0Eh);
        vga.set_pixel(7, 3, 9).unwrap();
        assert_eq!(vga.vram()[7 + 640 * 3], 9);
        assert_eq!(vga.vram().iter().filter(|&&p| p != 0).count(), 1);
    }

    #[test]
    fn test_pixel_bounds_are_rejected() {
        let mut vga = vga(Mode::Vga13h);
        assert_eq!(
            vga.set_pixel(320, 0, 1),
            Err(VgaError::OutOfRange {
                what: "x",
                value: 320,
                limit: 320
            })
        );
        assert!(matches!(vga.set_pixel(0, 200, 1), Err(VgaError::OutOfRange { what: "y", .. })));
        assert!(vga.get_pixel(0, 200).is_err());
        assert!(vga.vram().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_index_checked_against_palette_size() {
        let mut vga = vga(Mode::Vga12h);
        assert!(vga.set_pixel(0, 0, 15).is_ok());
        assert_eq!(
            vga.set_pixel(1, 0, 16),
            Err(VgaError::OutOfRange {
                what: "palette index",
                value: 16,
                limit: 16
            })
        );
        assert!(vga.clear(16).is_err());
        assert_eq!(vga.get_pixel(1, 0), Ok(0));

        let mut vga = self::vga(Mode::Vga13h);
        assert!(vga.set_pixel(0, 0, 255).is_ok());
    }

    #[test]
    fn test_default_palette() {
        let vga16 = vga(Mode::Vga12h);
        assert_eq!(vga16.palette(), &EGA_PALETTE[..]);

        let vga256 = vga(Mode::Vga13h);
        assert_eq!(vga256.palette().len(), 256);
        assert_eq!(&vga256.palette()[..16], &EGA_PALETTE[..]);
        assert!(vga256.palette()[16..].iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_set_and_get_color() {
        let mut vga = vga(Mode::Vga12h);
        vga.set_color(3, Color::new(1, 2, 3)).unwrap();
        assert_eq!(vga.get_color(3), Ok(Color::new(1, 2, 3)));
        assert!(matches!(vga.set_color(16, Color::WHITE), Err(VgaError::OutOfRange { .. })));
        assert!(vga.get_color(16).is_err());
    }

    #[test]
    fn test_set_palette_partial_and_oversized() {
        let mut vga = vga(Mode::Vga13h);
        let ramp: Vec<Color> = (0..4).map(|i| Color::new(i, i, i)).collect();
        vga.set_palette(&ramp).unwrap();
        assert_eq!(&vga.palette()[..4], &ramp[..]);
        assert_eq!(&vga.palette()[4..16], &EGA_PALETTE[4..]);

        let before = vga.palette().to_vec();
        let too_many = vec![Color::WHITE; 300];
        assert!(matches!(vga.set_palette(&too_many), Err(VgaError::InvalidArgument(_))));
        assert_eq!(vga.palette(), &before[..]);
    }

    #[test]
    fn test_reset_palette() {
        let mut vga = vga(Mode::Vga13h);
        vga.set_palette(&vec![Color::WHITE; 256]).unwrap();
        vga.reset_palette();
        assert_eq!(&vga.palette()[..16], &EGA_PALETTE[..]);
        assert!(vga.palette()[16..].iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_palette_rotation_cycles() {
        let mut vga = vga(Mode::Vga13h);
        let mut ramp = vec![Color::BLACK; 256];
        let mut c = Color::BLACK;
        for slot in ramp.iter_mut() {
            *slot = c;
            c.increment();
        }
        vga.set_palette(&ramp).unwrap();

        vga.rotate_palette(1);
        assert_eq!(vga.palette()[0], Color::new(1, 1, 1));
        assert_eq!(vga.palette()[255], Color::BLACK);

        for _ in 1..256 {
            vga.rotate_palette(1);
        }
        assert_eq!(vga.palette(), &ramp[..]);
    }

    #[test]
    fn test_full_blit() {
        let mut vga = vga(Mode::Ega0Dh);
        let image: Vec<u8> = (0..320 * 200).map(|i| (i % 16) as u8).collect();
        vga.blit(&image).unwrap();
        assert_eq!(vga.vram(), &image[..]);

        assert!(matches!(vga.blit(&image[1..]), Err(VgaError::InvalidArgument(_))));

        let mut bad = image.clone();
        bad[1000] = 16;
        assert!(matches!(vga.blit(&bad), Err(VgaError::OutOfRange { value: 16, .. })));
        assert_eq!(vga.vram(), &image[..]);
    }

    #[test]
    fn test_sprite_blit_inside() {
        let mut vga = vga(Mode::Vga13h);
        let mut sprite = Sprite::from_pixels(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        sprite.set_position(10, 20);
        vga.blit_sprite(&sprite).unwrap();

        assert_eq!(vga.get_pixel(10, 20), Ok(1));
        assert_eq!(vga.get_pixel(12, 20), Ok(3));
        assert_eq!(vga.get_pixel(10, 21), Ok(4));
        assert_eq!(vga.get_pixel(12, 21), Ok(6));
        assert_eq!(vga.vram().iter().filter(|&&p| p != 0).count(), 6);
    }

    #[test]
    fn test_sprite_fully_outside_changes_nothing() {
        let mut vga = vga(Mode::Vga13h);
        let image: Vec<u8> = (0..320 * 200).map(|i| (i % 251) as u8).collect();
        vga.blit(&image).unwrap();

        let mut sprite = Sprite::new(16, 16).unwrap();
        sprite.fill(255);
        for (x, y) in [(-16, 0), (320, 0), (0, -16), (0, 200), (-100, -100), (400, 300)] {
            sprite.set_position(x, y);
            vga.blit_sprite(&sprite).unwrap();
        }
        assert_eq!(vga.vram(), &image[..]);
    }

    #[test]
    fn test_sprite_straddling_edges_changes_only_intersection() {
        for (x, y) in [(-2, -3), (317, 197), (-4, 190), (310, -6)] {
            let mut vga = vga(Mode::Vga13h);
            let mut sprite = Sprite::new(8, 8).unwrap();
            sprite.fill(7);
            sprite.set_position(x, y);
            vga.blit_sprite(&sprite).unwrap();

            for py in 0..200i32 {
                for px in 0..320i32 {
                    let inside = px >= x && px < x + 8 && py >= y && py < y + 8;
                    let expected = if inside { 7 } else { 0 };
                    assert_eq!(
                        vga.get_pixel(px as usize, py as usize),
                        Ok(expected),
                        "sprite at ({}, {}), pixel ({}, {})",
                        x,
                        y,
                        px,
                        py
                    );
                }
            }
        }
    }

    #[test]
    fn test_clipped_blit_keeps_sprite_stride() {
        let mut vga = vga(Mode::Vga13h);
        let pixels: Vec<u8> = (1..=16).collect();
        let mut sprite = Sprite::from_pixels(4, 4, pixels).unwrap();
        sprite.set_position(-1, -2);
        vga.blit_sprite(&sprite).unwrap();

        // rows 2 and 3 of the sprite, columns 1..4
        assert_eq!(&vga.vram()[0..4], &[10, 11, 12, 0]);
        assert_eq!(&vga.vram()[320..324], &[14, 15, 16, 0]);
        assert_eq!(vga.get_pixel(0, 2), Ok(0));
    }

    #[test]
    fn test_sprite_with_bad_index_writes_nothing() {
        let mut vga = vga(Mode::Ega0Dh);
        let mut sprite = Sprite::from_pixels(2, 2, vec![1, 1, 1, 200]).unwrap();
        sprite.set_position(5, 5);
        assert!(matches!(vga.blit_sprite(&sprite), Err(VgaError::OutOfRange { .. })));
        assert!(vga.vram().iter().all(|&p| p == 0));

        sprite.set_position(-1, -1);
        assert!(vga.blit_sprite(&sprite).is_err());
        // the bad pixel is clipped away here
        sprite.set_position(319, 199);
        assert!(vga.blit_sprite(&sprite).is_ok());
        assert_eq!(vga.get_pixel(319, 199), Ok(1));
    }

    #[test]
    fn test_set_mode_resets_state() {
        let mut vga = vga(Mode::Vga13h);
        vga.set_pixel(1, 1, 200).unwrap();
        vga.set_color(3, Color::WHITE).unwrap();
        vga.set_cursor(5, 5);

        vga.set_mode(Mode::Vga12h).unwrap();
        assert_eq!(vga.mode(), Mode::Vga12h);
        assert_eq!(vga.size(), (640, 480));
        assert_eq!(vga.num_colors(), 16);
        assert_eq!(vga.vram().len(), 640 * 480);
        assert!(vga.vram().iter().all(|&p| p == 0));
        assert_eq!(vga.palette(), &EGA_PALETTE[..]);
        assert_eq!(vga.cursor(), (0, 0));
        assert_eq!(vga.font().size(), (8, 16));
        assert_eq!(vga.grid(), (80, 30));
    }

    #[test]
    fn test_set_mode_unknown_is_atomic() {
        let fonts = FontSet::builtin();
        let config = VgaConfig {
            modes: ModeTable::new([(
                Mode::Vga13h,
                ModeInfo::new(320, 200, 256, ModeKind::Graphics, fonts.vga_8x8.clone()),
            )])
            .unwrap(),
            default_palette: EGA_PALETTE.to_vec(),
        };
        let mut vga = Vga::with_config(MemorySurface::new(), Mode::Vga13h, config).unwrap();
        vga.set_pixel(3, 3, 42).unwrap();

        assert_eq!(vga.set_mode(Mode::Vga03h), Err(VgaError::UnknownMode(Mode::Vga03h)));
        assert_eq!(vga.mode(), Mode::Vga13h);
        assert_eq!(vga.get_pixel(3, 3), Ok(42));
        assert_eq!(vga.surface().live_textures(), 1);
        assert!(vga.show().is_ok());
    }

    #[test]
    fn test_construction_with_unknown_mode_fails() {
        let config = VgaConfig {
            modes: ModeTable::new([]).unwrap(),
            default_palette: EGA_PALETTE.to_vec(),
        };
        let result = Vga::with_config(MemorySurface::new(), Mode::Vga13h, config);
        assert!(matches!(result, Err(VgaError::UnknownMode(Mode::Vga13h))));
    }

    #[test]
    fn test_mode_switches_release_textures() {
        let mut vga = vga(Mode::Vga13h);
        for mode in Mode::ALL.into_iter().cycle().take(20) {
            vga.set_mode(mode).unwrap();
            assert_eq!(vga.surface().live_textures(), 1);
        }
        assert_eq!(vga.surface().peak_live_textures(), 1);
        assert_eq!(vga.surface().textures_created, 21);
    }

    #[test]
    fn test_texture_creation_failure() {
        let mut vga = vga(Mode::Vga13h);
        vga.set_pixel(0, 0, 9).unwrap();
        vga.surface_mut().fail_next_create();

        assert!(matches!(vga.set_mode(Mode::Vga12h), Err(VgaError::ResourceCreationFailed(_))));
        assert_eq!(vga.surface().live_textures(), 0);
        assert_eq!(vga.mode(), Mode::Vga13h);
        assert_eq!(vga.get_pixel(0, 0), Ok(9));
        assert!(matches!(vga.show(), Err(VgaError::ResourceCreationFailed(_))));

        vga.set_mode(Mode::Vga12h).unwrap();
        assert!(vga.show().is_ok());
    }

    #[test]
    fn test_construction_texture_failure() {
        let mut surface = MemorySurface::new();
        surface.fail_next_create();
        assert!(matches!(
            Vga::new(surface, Mode::Vga13h),
            Err(VgaError::ResourceCreationFailed(_))
        ));
    }

    #[test]
    fn test_drop_releases_texture() {
        let surface = MemorySurface::new();
        let live = surface.live_counter();
        let vga = Vga::new(surface, Mode::Vga13h).unwrap();
        assert_eq!(live.get(), 1);
        drop(vga);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_every_mode_shows_full_frame() {
        for mode in Mode::ALL {
            let mut vga = vga(mode);
            vga.clear(1).unwrap();
            vga.show().unwrap();
            let (w, h) = vga.size();
            assert_eq!(vga.surface().frame.len(), w * h);
            assert!(vga.frame().iter().all(|&p| p == EGA_PALETTE[1].to_argb()));
        }
    }

    #[test]
    fn test_show_tracks_palette_changes() {
        let mut vga = vga(Mode::Vga13h);
        vga.set_pixel(4, 0, 100).unwrap();
        vga.show().unwrap();
        assert_eq!(vga.frame()[4], 0xff000000);

        vga.set_color(100, Color::from_packed(0x123456)).unwrap();
        vga.show().unwrap();
        assert_eq!(vga.frame()[4], 0xff123456);
        assert_eq!(vga.surface().frames_presented, 2);
    }

    #[test]
    fn test_putchar_at_draws_glyph() {
        let mut vga = vga(Mode::Vga13h);
        vga.putchar_at(b'A', 15, 1, 16, 8).unwrap();

        let glyph = vga.font().glyph(b'A', 15, 1);
        for row in 0..8 {
            for col in 0..8 {
                assert_eq!(vga.get_pixel(16 + col, 8 + row), Ok(glyph[row * 8 + col]));
            }
        }
        assert_eq!(vga.get_pixel(15, 8), Ok(0));
        assert_eq!(vga.get_pixel(24, 8), Ok(0));
    }

    #[test]
    fn test_putchar_at_clips_and_checks_colors() {
        let mut vga = vga(Mode::Vga12h);
        vga.putchar_at(0xdb, 4, 0, 636, 476).unwrap();
        assert_eq!(vga.get_pixel(639, 479), Ok(4));
        assert_eq!(vga.get_pixel(636, 476), Ok(4));
        assert!(vga.putchar_at(b'A', 16, 0, 0, 0).is_err());
        assert!(vga.putchar_at(b'A', 1, 16, 0, 0).is_err());
    }

    #[test]
    fn test_putchar_advances_and_wraps_cursor() {
        let mut vga = vga(Mode::Vga03h);
        assert_eq!(vga.grid(), (80, 25));

        vga.set_cursor(79, 0);
        vga.putchar(0xdb, 7).unwrap();
        assert_eq!(vga.cursor(), (0, 1));
        assert_eq!(vga.get_pixel(79 * 9, 0), Ok(7));
        // ninth column of a 9-wide cell stays background
        assert_eq!(vga.get_pixel(79 * 9 + 8, 0), Ok(0));

        vga.set_cursor(79, 24);
        vga.putchar(b'x', 7).unwrap();
        assert_eq!(vga.cursor(), (0, 0));
    }

    #[test]
    fn test_set_cursor_wraps() {
        let mut vga = vga(Mode::Vga13h);
        assert_eq!(vga.grid(), (40, 25));
        vga.set_cursor(41, 26);
        assert_eq!(vga.cursor(), (1, 1));
        vga.set_cursor(40 * 3, 25 * 2 + 24);
        assert_eq!(vga.cursor(), (0, 24));
    }

    #[test]
    fn test_print() {
        let mut vga = vga(Mode::Vga13h);
        vga.print("ab\ncd", 2, 3, 14, true).unwrap();
        assert_eq!(vga.cursor(), (2, 4));

        let glyph = vga.font().glyph(b'd', 14, 0);
        for row in 0..8 {
            for col in 0..8 {
                assert_eq!(vga.get_pixel(8 + col, 32 + row), Ok(glyph[row * 8 + col]));
            }
        }

        vga.print("zz", 10, 10, 14, false).unwrap();
        assert_eq!(vga.cursor(), (2, 4));

        assert!(vga.print("x", 0, 0, 16, true).is_ok());
        let mut vga16 = self::vga(Mode::Vga12h);
        assert!(vga16.print("x", 0, 0, 16, true).is_err());
        assert!(vga16.vram().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_print_replaces_wide_chars() {
        let mut a = vga(Mode::Vga13h);
        let mut b = vga(Mode::Vga13h);
        a.print("€é", 0, 0, 15, true).unwrap();
        b.putchar(b'?', 15).unwrap();
        b.putchar(0xe9, 15).unwrap();
        assert_eq!(a.vram(), b.vram());
    }

    #[test]
    fn test_set_font() {
        let fonts = FontSet::builtin();
        let mut vga = vga(Mode::Vga13h);
        vga.set_cursor(39, 24);
        vga.set_font(fonts.vga_8x16.clone()).unwrap();
        assert_eq!(vga.grid(), (40, 12));
        assert_eq!(vga.cursor(), (39, 0));

        let custom = ModeInfo::new(8, 8, 16, ModeKind::Graphics, fonts.vga_8x8.clone());
        let config = VgaConfig {
            modes: ModeTable::new([(Mode::Ega0Dh, custom)]).unwrap(),
            default_palette: EGA_PALETTE.to_vec(),
        };
        let mut tiny = Vga::with_config(MemorySurface::new(), Mode::Ega0Dh, config).unwrap();
        assert!(matches!(tiny.set_font(fonts.vga_8x16), Err(VgaError::InvalidArgument(_))));
        assert_eq!(tiny.grid(), (1, 1));
    }

    #[test]
    fn test_scroll_up_and_down() {
        let mut vga = vga(Mode::Vga13h);
        vga.set_pixel(0, 8, 3).unwrap();
        vga.set_pixel(5, 199, 4).unwrap();

        vga.scroll_up(1);
        assert_eq!(vga.get_pixel(0, 0), Ok(3));
        assert_eq!(vga.get_pixel(5, 191), Ok(4));
        assert!((192..200).all(|y| vga.get_pixel(5, y) == Ok(0)));

        vga.scroll_down(2);
        assert_eq!(vga.get_pixel(0, 16), Ok(3));
        assert!((0..16).all(|y| vga.get_pixel(0, y) == Ok(0)));
        assert_eq!(vga.vram().iter().filter(|&&p| p != 0).count(), 1);

        vga.scroll_up(100);
        assert!(vga.vram().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_custom_default_palette() {
        let config = VgaConfig {
            modes: ModeTable::default(),
            default_palette: vec![Color::WHITE, Color::new(1, 2, 3)],
        };
        let mut vga = Vga::with_config(MemorySurface::new(), Mode::Vga12h, config).unwrap();
        assert_eq!(vga.get_color(1), Ok(Color::new(1, 2, 3)));
        assert_eq!(vga.get_color(2), Ok(Color::BLACK));

        vga.set_color(2, Color::WHITE).unwrap();
        vga.set_mode(Mode::Vga13h).unwrap();
        assert_eq!(vga.get_color(0), Ok(Color::WHITE));
        assert_eq!(vga.get_color(2), Ok(Color::BLACK));
    }
}
