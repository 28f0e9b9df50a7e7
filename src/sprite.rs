use crate::error::VgaError;

/// A rectangle of palette indices with a screen position.
///
/// Sprites own their pixels and never clip themselves; the display device
/// clips against the framebuffer when blitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    pixels: Vec<u8>,
}

impl Sprite {
    /// A zero-filled sprite at the origin.
    pub fn new(width: usize, height: usize) -> Result<Self, VgaError> {
        let len = Self::check_size(width, height)?;
        Ok(Sprite {
            width,
            height,
            x: 0,
            y: 0,
            pixels: vec![0; len],
        })
    }

    /// A sprite over caller-supplied row-major pixels.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, VgaError> {
        let len = Self::check_size(width, height)?;
        if pixels.len() != len {
            return Err(VgaError::invalid(format!(
                "sprite of {}x{} needs {} pixels, got {}",
                width,
                height,
                len,
                pixels.len()
            )));
        }
        Ok(Sprite {
            width,
            height,
            x: 0,
            y: 0,
            pixels,
        })
    }

    /// Validates the dimensions and returns the pixel count.
    fn check_size(width: usize, height: usize) -> Result<usize, VgaError> {
        if width == 0 || height == 0 {
            return Err(VgaError::invalid(format!(
                "sprite dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        width.checked_mul(height).ok_or_else(|| {
            VgaError::invalid(format!("sprite of {}x{} is too large", width, height))
        })
    }

    pub fn fill(&mut self, index: u8) {
        self.pixels.fill(index);
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// One row of pixels; `row` must be below the height.
    pub fn row(&self, row: usize) -> &[u8] {
        &self.pixels[row * self.width..(row + 1) * self.width]
    }
}
