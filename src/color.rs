use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

/// A true-color value with three 8-bit channels.
///
/// All arithmetic saturates per channel: sums and products clamp to 255,
/// differences clamp to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, u8::MAX as i32) as u8
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Builds a color from `0xRRGGBB`. Bits above the low 24 are ignored.
    pub const fn from_packed(rgb: u32) -> Self {
        Color {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    pub const fn to_packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Opaque ARGB8888, the layout handed to presentation surfaces.
    pub const fn to_argb(self) -> u32 {
        0xff00_0000 | self.to_packed()
    }

    pub fn increment(&mut self) {
        *self += 1;
    }

    pub fn decrement(&mut self) {
        *self -= 1;
    }

    fn map(self, other: Color, op: impl Fn(i32, i32) -> i32) -> Color {
        Color {
            r: clamp_channel(op(self.r as i32, other.r as i32)),
            g: clamp_channel(op(self.g as i32, other.g as i32)),
            b: clamp_channel(op(self.b as i32, other.b as i32)),
        }
    }

    fn map_scalar(self, scalar: i32, op: impl Fn(i32, i32) -> i32) -> Color {
        Color {
            r: clamp_channel(op(self.r as i32, scalar)),
            g: clamp_channel(op(self.g as i32, scalar)),
            b: clamp_channel(op(self.b as i32, scalar)),
        }
    }
}

impl From<u32> for Color {
    fn from(rgb: u32) -> Self {
        Color::from_packed(rgb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_packed()
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color { r, g, b }
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        self.map(rhs, |a, b| a + b)
    }
}

impl Add<i32> for Color {
    type Output = Color;

    fn add(self, rhs: i32) -> Color {
        self.map_scalar(rhs, i32::saturating_add)
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Color {
        self.map(rhs, |a, b| a - b)
    }
}

impl Sub<i32> for Color {
    type Output = Color;

    fn sub(self, rhs: i32) -> Color {
        self.map_scalar(rhs, i32::saturating_sub)
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        self.map(rhs, |a, b| a * b)
    }
}

impl Mul<i32> for Color {
    type Output = Color;

    fn mul(self, rhs: i32) -> Color {
        self.map_scalar(rhs, i32::saturating_mul)
    }
}

macro_rules! assign_op {
    ($trait:ident, $method:ident, $op:tt, $rhs:ty) => {
        impl $trait<$rhs> for Color {
            fn $method(&mut self, rhs: $rhs) {
                *self = *self $op rhs;
            }
        }
    };
}

assign_op!(AddAssign, add_assign, +, Color);
assign_op!(AddAssign, add_assign, +, i32);
assign_op!(SubAssign, sub_assign, -, Color);
assign_op!(SubAssign, sub_assign, -, i32);
assign_op!(MulAssign, mul_assign, *, Color);
assign_op!(MulAssign, mul_assign, *, i32);
