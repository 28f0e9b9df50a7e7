use sdl2::VideoSubsystem;
use sdl2::pixels::{Color as SdlColor, PixelFormatEnum};
use sdl2::render::{Texture, TextureCreator, WindowCanvas};
use sdl2::video::WindowContext;

use super::Surface;
use crate::error::VgaError;

/// Presents frames through an SDL2 renderer and one streaming texture.
pub struct SdlSurface {
    canvas: WindowCanvas,
    creator: TextureCreator<WindowContext>,
    bytes: Vec<u8>,
}

/// Owns an SDL texture and destroys it on drop.
pub struct SdlTexture(Option<Texture>);

impl Drop for SdlTexture {
    fn drop(&mut self) {
        if let Some(texture) = self.0.take() {
            // SAFETY: the device drops its texture before its surface, so the
            // renderer that created this texture is still alive.
            unsafe { texture.destroy() };
        }
    }
}

impl SdlSurface {
    pub fn new(video: &VideoSubsystem, title: &str, width: u32, height: u32) -> Result<Self, VgaError> {
        let window = video
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| VgaError::ResourceCreationFailed(e.to_string()))?;
        let canvas = window
            .into_canvas()
            .present_vsync()
            .build()
            .map_err(|e| VgaError::ResourceCreationFailed(e.to_string()))?;
        let creator = canvas.texture_creator();

        Ok(SdlSurface {
            canvas,
            creator,
            bytes: Vec::new(),
        })
    }
}

impl Surface for SdlSurface {
    type Texture = SdlTexture;

    fn create_texture(&mut self, width: usize, height: usize) -> Result<SdlTexture, VgaError> {
        sdl2::hint::set("SDL_RENDER_SCALE_QUALITY", "linear");
        self.canvas
            .set_logical_size(width as u32, height as u32)
            .map_err(|e| VgaError::ResourceCreationFailed(e.to_string()))?;

        self.canvas.set_draw_color(SdlColor::RGB(0, 0, 0));
        self.canvas.clear();
        self.canvas.present();

        let texture = self
            .creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width as u32, height as u32)
            .map_err(|e| VgaError::ResourceCreationFailed(e.to_string()))?;
        log::debug!("sdl streaming texture {}x{}", width, height);
        Ok(SdlTexture(Some(texture)))
    }

    fn present(
        &mut self,
        texture: &mut SdlTexture,
        frame: &[u32],
        _width: usize,
        _height: usize,
        pitch: usize,
    ) -> Result<(), VgaError> {
        let Some(texture) = texture.0.as_mut() else {
            return Err(VgaError::PresentFailed("texture already destroyed".to_string()));
        };

        self.bytes.clear();
        self.bytes.extend(frame.iter().flat_map(|argb| argb.to_ne_bytes()));

        texture
            .update(None, &self.bytes, pitch)
            .map_err(|e| VgaError::PresentFailed(e.to_string()))?;
        self.canvas.clear();
        self.canvas
            .copy(texture, None, None)
            .map_err(VgaError::PresentFailed)?;
        self.canvas.present();
        Ok(())
    }
}
