mod bars;
mod fire;
mod font_sheet;
mod plasma;
mod text;
mod xor;

use retro_vga::{Mode, Surface, Vga, VgaError};

pub trait Demo<S: Surface> {
    fn setup(&mut self, vga: &mut Vga<S>) -> Result<(), VgaError>;

    /// Called once per displayed frame, before `show`.
    fn update(&mut self, _vga: &mut Vga<S>) -> Result<(), VgaError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DemoKind {
    /// Vertical color bars
    Bars,
    /// XOR texture over a gray ramp
    Xor,
    /// Sine plasma with palette cycling
    Plasma,
    /// Classic fire effect
    Fire,
    /// All 256 glyphs of the active font
    Font,
    /// Scrolling text console
    Text,
}

impl DemoKind {
    pub fn default_mode(self) -> Mode {
        match self {
            DemoKind::Text => Mode::Vga03h,
            _ => Mode::Vga13h,
        }
    }

    /// Demos that drive a full 256-entry palette only run in mode 13h.
    pub fn needs_256_colors(self) -> bool {
        matches!(self, DemoKind::Plasma | DemoKind::Fire)
    }

    pub fn build<S: Surface>(self) -> Box<dyn Demo<S>> {
        match self {
            DemoKind::Bars => Box::new(bars::Bars),
            DemoKind::Xor => Box::new(xor::Xor),
            DemoKind::Plasma => Box::new(plasma::Plasma::default()),
            DemoKind::Fire => Box::new(fire::Fire::default()),
            DemoKind::Font => Box::new(font_sheet::FontSheet),
            DemoKind::Text => Box::new(text::Console::default()),
        }
    }
}

pub(crate) fn require_256_colors<S: Surface>(vga: &Vga<S>) -> Result<(), VgaError> {
    if vga.num_colors() != 256 {
        return Err(VgaError::InvalidArgument(format!(
            "demo needs a 256-color mode, {} has {}",
            vga.mode(),
            vga.num_colors()
        )));
    }
    Ok(())
}
