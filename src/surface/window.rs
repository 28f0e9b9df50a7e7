use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use super::Surface;
use crate::error::VgaError;

/// Presents frames into a winit window through `pixels`.
///
/// Every texture is a `Pixels` context scaled to the window, so switching
/// modes only changes the logical buffer size.
pub struct PixelsSurface<'win> {
    window: &'win Window,
}

impl<'win> PixelsSurface<'win> {
    pub fn new(window: &'win Window) -> Self {
        PixelsSurface { window }
    }

    pub fn window(&self) -> &'win Window {
        self.window
    }
}

impl<'win> Surface for PixelsSurface<'win> {
    type Texture = Pixels<'win>;

    fn create_texture(&mut self, width: usize, height: usize) -> Result<Pixels<'win>, VgaError> {
        let window_size = self.window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, self.window);
        let pixels = Pixels::new(width as u32, height as u32, surface_texture)
            .map_err(|e| VgaError::ResourceCreationFailed(e.to_string()))?;

        log::debug!(
            "pixels context {}x{} on a {}x{} window",
            width,
            height,
            window_size.width,
            window_size.height
        );
        Ok(pixels)
    }

    fn present(
        &mut self,
        texture: &mut Pixels<'win>,
        frame: &[u32],
        _width: usize,
        _height: usize,
        _pitch: usize,
    ) -> Result<(), VgaError> {
        for (rgba, &argb) in texture.frame_mut().chunks_exact_mut(4).zip(frame) {
            let [_, r, g, b] = argb.to_be_bytes();
            rgba.copy_from_slice(&[r, g, b, 0xff]);
        }

        texture
            .render()
            .map_err(|e| VgaError::PresentFailed(e.to_string()))
    }
}
