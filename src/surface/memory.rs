use std::cell::Cell;
use std::rc::Rc;

use super::Surface;
use crate::error::VgaError;

/// Headless surface that keeps the last presented frame.
#[derive(Debug, Default)]
pub struct MemorySurface {
    pub frame: Vec<u32>,
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
    pub frames_presented: u64,
    pub textures_created: u64,
    live: Rc<Cell<usize>>,
    peak_live: usize,
    fail_next_create: bool,
}

#[derive(Debug)]
pub struct MemoryTexture {
    pub width: usize,
    pub height: usize,
    live: Rc<Cell<usize>>,
}

impl Drop for MemoryTexture {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Textures created and not yet dropped.
    pub fn live_textures(&self) -> usize {
        self.live.get()
    }

    /// Shared count of live textures, readable after the surface is moved.
    pub fn live_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.live)
    }

    /// The most textures that were ever alive at once.
    pub fn peak_live_textures(&self) -> usize {
        self.peak_live
    }

    /// Makes the next `create_texture` call fail.
    pub fn fail_next_create(&mut self) {
        self.fail_next_create = true;
    }
}

impl Surface for MemorySurface {
    type Texture = MemoryTexture;

    fn create_texture(&mut self, width: usize, height: usize) -> Result<MemoryTexture, VgaError> {
        if std::mem::take(&mut self.fail_next_create) {
            return Err(VgaError::ResourceCreationFailed(format!(
                "refusing {}x{} texture",
                width, height
            )));
        }

        self.live.set(self.live.get() + 1);
        self.peak_live = self.peak_live.max(self.live.get());
        self.textures_created += 1;

        Ok(MemoryTexture {
            width,
            height,
            live: Rc::clone(&self.live),
        })
    }

    fn present(
        &mut self,
        texture: &mut MemoryTexture,
        frame: &[u32],
        width: usize,
        height: usize,
        pitch: usize,
    ) -> Result<(), VgaError> {
        if (texture.width, texture.height) != (width, height) {
            return Err(VgaError::PresentFailed(format!(
                "{}x{} frame does not match {}x{} texture",
                width, height, texture.width, texture.height
            )));
        }

        self.frame.clear();
        self.frame.extend_from_slice(frame);
        self.width = width;
        self.height = height;
        self.pitch = pitch;
        self.frames_presented += 1;
        Ok(())
    }
}
