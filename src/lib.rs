pub mod color;
pub mod error;
pub mod font;
pub mod sprite;
pub mod surface;
pub mod vga;

pub use color::Color;
pub use error::VgaError;
pub use font::{Font, FontSet};
pub use sprite::Sprite;
pub use surface::Surface;
pub use vga::mode::{Mode, ModeInfo, ModeKind, ModeTable};
pub use vga::{Vga, VgaConfig};
