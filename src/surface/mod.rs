//! Presentation surfaces.
//!
//! A surface turns resolved true-color frames into something visible. The
//! display device holds at most one texture at a time and hands it back to
//! the surface for release before asking for a new one.

pub mod memory;
pub mod window;
#[cfg(feature = "sdl")]
pub mod sdl;

use crate::error::VgaError;

pub use memory::MemorySurface;
pub use window::PixelsSurface;
#[cfg(feature = "sdl")]
pub use sdl::SdlSurface;

pub trait Surface {
    /// Backend resource sized for one video mode.
    type Texture;

    fn create_texture(&mut self, width: usize, height: usize) -> Result<Self::Texture, VgaError>;

    fn release_texture(&mut self, texture: Self::Texture) {
        drop(texture);
    }

    /// Displays one ARGB8888 frame. `pitch` is the row length in bytes.
    fn present(
        &mut self,
        texture: &mut Self::Texture,
        frame: &[u32],
        width: usize,
        height: usize,
        pitch: usize,
    ) -> Result<(), VgaError>;
}
