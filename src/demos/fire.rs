use retro_vga::{Color, Surface, Vga, VgaError};

use super::{Demo, require_256_colors};

/// 15-bit linear feedback shift register, taps on bits 0 and 1.
struct Lfsr(u16);

impl Lfsr {
    fn next_byte(&mut self) -> u8 {
        let mut byte = 0;
        for _ in 0..8 {
            let feedback = (self.0 ^ (self.0 >> 1)) & 0b1;
            self.0 = (self.0 >> 1) | (feedback << 14);
            byte = (byte << 1) | (self.0 & 0b1) as u8;
        }
        byte
    }
}

pub struct Fire {
    heat: Vec<u8>,
    rng: Lfsr,
}

impl Default for Fire {
    fn default() -> Self {
        Fire {
            heat: Vec::new(),
            rng: Lfsr(0x2a5f),
        }
    }
}

fn palette() -> Vec<Color> {
    let mut colors = Vec::with_capacity(256);

    // black to dark red
    let mut c = Color::BLACK;
    for _ in 0..33 {
        colors.push(c);
        c += Color::new(4, 0, 0);
    }

    // red to orange
    let mut c = Color::new(128, 0, 0);
    for _ in 0..32 {
        colors.push(c);
        c += Color::new(2, 4, 0);
    }

    // orange to yellow
    let mut c = Color::new(192, 128, 0);
    for _ in 0..31 {
        colors.push(c);
        c += Color::new(0, 2, 0);
    }

    // yellow to white
    for n in 96..256 {
        let t = (n - 96) as f32 / (255.0 - 96.0);
        let lerp = |a: f32, b: f32| (a + (b - a) * t) as u8;
        colors.push(Color::new(lerp(192.0, 255.0), lerp(192.0, 255.0), lerp(0.0, 255.0)));
    }
    colors
}

impl<S: Surface> Demo<S> for Fire {
    fn setup(&mut self, vga: &mut Vga<S>) -> Result<(), VgaError> {
        require_256_colors(vga)?;
        vga.set_palette(&palette())?;

        let (width, height) = vga.size();
        self.heat = vec![0; width * height];
        Ok(())
    }

    fn update(&mut self, vga: &mut Vga<S>) -> Result<(), VgaError> {
        let (width, height) = vga.size();
        let heat = &mut self.heat;

        // hot spots along the bottom row
        for cell in &mut heat[width * (height - 1)..] {
            *cell = self.rng.next_byte();
        }

        for y in 0..height - 1 {
            for x in 0..width {
                let left = (x + width - 1) % width + width * (y + 1);
                let center = x + width * (y + 1);
                let right = (x + 1) % width + width * (y + 1);
                let two_down = x + width * ((y + 2) % height);

                let sum: u32 = [left, center, right, two_down]
                    .iter()
                    .map(|&i| u32::from(heat[i]))
                    .sum();
                // the divisor sets the flame height
                heat[x + width * y] = (sum as f32 / 4.03) as u8;
            }
        }

        vga.blit(heat)
    }
}
