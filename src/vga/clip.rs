/// The visible part of a rectangle placed on a framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clip {
    /// Offset of the first visible column/row inside the source rectangle.
    pub src_x: usize,
    pub src_y: usize,
    /// Where that first visible pixel lands on the framebuffer.
    pub dst_x: usize,
    pub dst_y: usize,
    pub width: usize,
    pub height: usize,
}

/// Intersects `[x, x+w) x [y, y+h)` with `[0, fb_width) x [0, fb_height)`.
/// Returns `None` when nothing is visible.
pub fn intersect(
    x: i32,
    y: i32,
    w: usize,
    h: usize,
    fb_width: usize,
    fb_height: usize,
) -> Option<Clip> {
    let (x, y) = (x as i64, y as i64);
    let left = x.max(0);
    let top = y.max(0);
    let right = (x + w as i64).min(fb_width as i64);
    let bottom = (y + h as i64).min(fb_height as i64);

    if left >= right || top >= bottom {
        return None;
    }

    Some(Clip {
        src_x: (left - x) as usize,
        src_y: (top - y) as usize,
        dst_x: left as usize,
        dst_y: top as usize,
        width: (right - left) as usize,
        height: (bottom - top) as usize,
    })
}
