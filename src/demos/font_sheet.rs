use retro_vga::{Surface, Vga, VgaError};

use super::Demo;

/// Draws all 256 glyphs of the active font as a 16 by 16 sheet.
pub struct FontSheet;

impl<S: Surface> Demo<S> for FontSheet {
    fn setup(&mut self, vga: &mut Vga<S>) -> Result<(), VgaError> {
        let (font_width, font_height) = vga.font().size();
        let fg = if vga.num_colors() > 7 { 7 } else { 1 };

        vga.clear(0)?;
        for code in 0..=u8::MAX {
            let x = (code as usize % 16) * font_width;
            let y = (code as usize / 16) * font_height;
            vga.putchar_at(code, fg, 0, x as i32, y as i32)?;
        }
        Ok(())
    }
}
