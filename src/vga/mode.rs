use std::fmt;

use crate::error::VgaError;
use crate::font::{Font, FontSet};

/// The standard BIOS video modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Mode {
    #[value(name = "03h")]
    Vga03h,
    #[value(name = "0dh")]
    Ega0Dh,
    #[value(name = "0eh")]
    Ega0Eh,
    #[value(name = "10h")]
    Ega10h,
    #[value(name = "12h")]
    Vga12h,
    #[value(name = "13h")]
    Vga13h,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Vga03h,
        Mode::Ega0Dh,
        Mode::Ega0Eh,
        Mode::Ega10h,
        Mode::Vga12h,
        Mode::Vga13h,
    ];

    pub fn number(self) -> u8 {
        match self {
            Mode::Vga03h => 0x03,
            Mode::Ega0Dh => 0x0d,
            Mode::Ega0Eh => 0x0e,
            Mode::Ega10h => 0x10,
            Mode::Vga12h => 0x12,
            Mode::Vga13h => 0x13,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}h", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Text,
    Graphics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeInfo {
    pub width: usize,
    pub height: usize,
    pub num_colors: usize,
    pub kind: ModeKind,
    pub font: Font,
}

impl ModeInfo {
    pub fn new(width: usize, height: usize, num_colors: usize, kind: ModeKind, font: Font) -> Self {
        ModeInfo {
            width,
            height,
            num_colors,
            kind,
            font,
        }
    }

    fn validate(&self, mode: Mode) -> Result<(), VgaError> {
        if self.width == 0 || self.height == 0 {
            return Err(VgaError::invalid(format!("mode {} has an empty framebuffer", mode)));
        }
        if self.num_colors == 0 || self.num_colors > 256 {
            return Err(VgaError::invalid(format!(
                "mode {} has {} colors, expected 1..=256",
                mode, self.num_colors
            )));
        }
        let (font_width, font_height) = self.font.size();
        if font_width > self.width || font_height > self.height {
            return Err(VgaError::invalid(format!(
                "mode {} font cell {}x{} does not fit {}x{}",
                mode, font_width, font_height, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Read-only registry of the modes a device can switch to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeTable {
    entries: Vec<(Mode, ModeInfo)>,
}

impl ModeTable {
    /// A table of caller-defined modes. A later entry for the same mode
    /// replaces an earlier one.
    pub fn new(entries: impl IntoIterator<Item = (Mode, ModeInfo)>) -> Result<Self, VgaError> {
        let mut table = ModeTable {
            entries: Vec::new(),
        };
        for (mode, info) in entries {
            info.validate(mode)?;
            match table.entries.iter_mut().find(|(m, _)| *m == mode) {
                Some(slot) => slot.1 = info,
                None => table.entries.push((mode, info)),
            }
        }
        Ok(table)
    }

    pub fn standard(fonts: &FontSet) -> Self {
        use ModeKind::*;

        ModeTable {
            entries: vec![
                (Mode::Vga03h, ModeInfo::new(720, 400, 16, Text, fonts.vga_9x16.clone())),
                (Mode::Ega0Dh, ModeInfo::new(320, 200, 16, Graphics, fonts.vga_8x8.clone())),
                (Mode::Ega0Eh, ModeInfo::new(640, 200, 16, Graphics, fonts.vga_8x8.clone())),
                (Mode::Ega10h, ModeInfo::new(640, 350, 16, Graphics, fonts.ega_8x14.clone())),
                (Mode::Vga12h, ModeInfo::new(640, 480, 16, Graphics, fonts.vga_8x16.clone())),
                (Mode::Vga13h, ModeInfo::new(320, 200, 256, Graphics, fonts.vga_8x8.clone())),
            ],
        }
    }

    pub fn lookup(&self, mode: Mode) -> Result<&ModeInfo, VgaError> {
        self.entries
            .iter()
            .find(|(m, _)| *m == mode)
            .map(|(_, info)| info)
            .ok_or(VgaError::UnknownMode(mode))
    }

    pub fn modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.entries.iter().map(|(mode, _)| *mode)
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        ModeTable::standard(&FontSet::builtin())
    }
}
