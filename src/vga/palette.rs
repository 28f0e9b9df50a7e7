use crate::color::Color;

pub const EGA_PALETTE: [Color; 16] = [
    Color::new(0, 0, 0),       // black
    Color::new(0, 0, 170),     // blue
    Color::new(0, 170, 0),     // green
    Color::new(0, 170, 170),   // cyan
    Color::new(170, 0, 0),     // red
    Color::new(170, 0, 170),   // magenta
    Color::new(170, 85, 0),    // brown
    Color::new(170, 170, 170), // light gray
    Color::new(85, 85, 85),    // dark gray
    Color::new(85, 85, 255),   // bright blue
    Color::new(85, 255, 85),   // bright green
    Color::new(85, 255, 255),  // bright cyan
    Color::new(255, 85, 85),   // bright red
    Color::new(255, 85, 255),  // bright magenta
    Color::new(255, 255, 85),  // bright yellow
    Color::new(255, 255, 255), // bright white
];

/// Copies `defaults` into `palette`, blacking out the slots it doesn't cover.
pub fn load_defaults(palette: &mut [Color], defaults: &[Color]) {
    let count = defaults.len().min(palette.len());
    palette[..count].copy_from_slice(&defaults[..count]);
    palette[count..].fill(Color::BLACK);
}
