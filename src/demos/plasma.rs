use std::f64::consts::PI;

use retro_vga::{Color, Surface, Vga, VgaError};

use super::{Demo, require_256_colors};

#[derive(Default)]
pub struct Plasma;

impl<S: Surface> Demo<S> for Plasma {
    fn setup(&mut self, vga: &mut Vga<S>) -> Result<(), VgaError> {
        require_256_colors(vga)?;

        // black to white and back along half a sine period
        let palette: Vec<Color> = (0..256)
            .map(|n| Color::BLACK + (256.0 * (PI / 255.0 * n as f64).sin()) as i32)
            .collect();
        vga.set_palette(&palette)?;

        let (width, height) = vga.size();
        let image: Vec<u8> = (0..width * height)
            .map(|i| {
                let x = (i % width) as f64;
                let y = (i / width) as f64;
                ((x * 0.1).cos() + (y * 0.1).sin()).mul_add(63.5, 128.0) as u8
            })
            .collect();
        vga.blit(&image)
    }

    fn update(&mut self, vga: &mut Vga<S>) -> Result<(), VgaError> {
        vga.rotate_palette(1);
        Ok(())
    }
}
