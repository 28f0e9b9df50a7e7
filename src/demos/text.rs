use retro_vga::{Surface, Vga, VgaError};

use super::Demo;

const LINES: [&str; 6] = [
    "C:\\>DIR /W",
    "Volume in drive C has no label",
    "AUTOEXEC.BAT  CONFIG.SYS  COMMAND.COM",
    "\u{c9}\u{cd}\u{cd}\u{cd}\u{cd}\u{cd}\u{cd}\u{cd}\u{cd}\u{bb}",
    "\u{ba} READY  \u{ba}",
    "\u{c8}\u{cd}\u{cd}\u{cd}\u{cd}\u{cd}\u{cd}\u{cd}\u{cd}\u{bc}",
];

/// Frames between printed lines.
const LINE_DELAY: u32 = 8;

/// A console that keeps printing lines and scrolls once the grid fills up.
#[derive(Default)]
pub struct Console {
    frame: u32,
    line: usize,
}

impl<S: Surface> Demo<S> for Console {
    fn setup(&mut self, vga: &mut Vga<S>) -> Result<(), VgaError> {
        vga.clear(0)?;
        let banner = format!("retro-vga mode {} console\n\n", vga.mode());
        let fg = (14 % vga.num_colors()) as u8;
        vga.print(&banner, 0, 0, fg, true)
    }

    fn update(&mut self, vga: &mut Vga<S>) -> Result<(), VgaError> {
        self.frame += 1;
        if self.frame % LINE_DELAY != 0 {
            return Ok(());
        }

        let colors = vga.num_colors().clamp(2, 16);
        let fg = (self.line % (colors - 1) + 1) as u8;
        let text = format!("{:5} {}", self.line, LINES[self.line % LINES.len()]);

        let (col, row) = vga.cursor();
        vga.print(&text, col, row, fg, false)?;
        self.line += 1;

        let (_, rows) = vga.grid();
        if row + 1 < rows {
            vga.set_cursor(0, row + 1);
        } else {
            vga.scroll_up(1);
            vga.set_cursor(0, row);
        }
        Ok(())
    }
}
