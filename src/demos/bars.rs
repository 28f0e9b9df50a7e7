use retro_vga::{Surface, Vga, VgaError};

use super::Demo;

/// Sixteen equal-width bars, one per low palette entry.
pub struct Bars;

impl<S: Surface> Demo<S> for Bars {
    fn setup(&mut self, vga: &mut Vga<S>) -> Result<(), VgaError> {
        let (width, height) = vga.size();
        let bar_width = (width / 16).max(1);
        let colors = vga.num_colors().min(16);

        for y in 0..height {
            for x in 0..width {
                let color = (x / bar_width).min(15) % colors;
                vga.set_pixel(x, y, color as u8)?;
            }
        }
        Ok(())
    }
}
