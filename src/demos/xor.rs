use retro_vga::{Color, Surface, Vga, VgaError};

use super::Demo;

pub struct Xor;

impl<S: Surface> Demo<S> for Xor {
    fn setup(&mut self, vga: &mut Vga<S>) -> Result<(), VgaError> {
        let colors = vga.num_colors();

        let mut ramp = Vec::with_capacity(colors);
        let mut gray = Color::BLACK;
        for _ in 0..colors {
            ramp.push(gray);
            gray.increment();
        }
        vga.set_palette(&ramp)?;

        let (width, height) = vga.size();
        for y in 0..height {
            for x in 0..width {
                vga.set_pixel(x, y, (((x ^ y) & 0xff) % colors) as u8)?;
            }
        }
        Ok(())
    }
}
