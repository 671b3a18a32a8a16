//! Color value aliases, the handful of named colors the decoders need, and
//! alpha range helpers.
//!
//! Packed values are plain integers so they can be passed by value through
//! the hot loops:
//!
//! | alias        | bits used | layout (MSB → LSB)                    |
//! |--------------|-----------|---------------------------------------|
//! | [`Color565`] | 16        | `RRRRR GGGGGG BBBBB`                  |
//! | [`Color4444`]| 16        | `AAAA RRRR GGGG BBBB`                 |
//! | [`Color6666`]| 24        | `AAAAAA RRRRRR GGGGGG BBBBBB`         |
//! | [`Color8565`]| 24        | `AAAAAAAA` + RGB565                   |
//! | [`Color888`] | 24        | `RRRRRRRR GGGGGGGG BBBBBBBB`          |
//! | [`Color8888`]| 32        | `AAAAAAAA RRRRRRRR GGGGGGGG BBBBBBBB` |

pub type Color565 = u16;
pub type Color4444 = u16;
pub type Color6666 = u32;
pub type Color8565 = u32;
pub type Color888 = u32;
pub type Color8888 = u32;

pub const RGB565_WHITE: Color565 = 0xFFFF;
pub const RGB565_BLACK: Color565 = 0x0000;
/// Fuchsia, the conventional chroma key for formats without alpha.
pub const RGB565_TRANSPARENT: Color565 = 0xF81F;

pub const RGB888_WHITE: Color888 = 0xFF_FFFF;
pub const RGB888_BLACK: Color888 = 0x00_0000;
pub const RGB888_TRANSPARENT: Color888 = 0xFF_00FF;

pub const ARGB8888_WHITE: Color8888 = 0xFFFF_FFFF;
pub const ARGB8888_BLACK: Color8888 = 0xFF00_0000;

/// Full opacity at 5-bit precision.
pub const ALPHA5_OPAQUE: u8 = 31;
/// Full opacity at 8-bit precision.
pub const ALPHA8_OPAQUE: u8 = 255;

/// An RGB565 color plus a separately stored alpha.
///
/// This is the output slot of the [`accessor_5565`](crate::access::accessor_5565)
/// and [`accessor_8565`](crate::access::accessor_8565) decoders. Which alpha
/// precision it holds depends on the table the accessor came from.
/// Decoders for formats without alpha never write `alpha`, so initialise it
/// once to the opacity you want and reuse the sample across a whole row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sample565 {
    pub color: Color565,
    pub alpha: u8,
}

impl Sample565 {
    #[inline]
    pub const fn new(color: Color565, alpha: u8) -> Self {
        Self { color, alpha }
    }

    /// Black, fully opaque at 5-bit precision.
    #[inline]
    pub const fn opaque5() -> Self {
        Self::new(RGB565_BLACK, ALPHA5_OPAQUE)
    }

    /// Black, fully opaque at 8-bit precision.
    #[inline]
    pub const fn opaque8() -> Self {
        Self::new(RGB565_BLACK, ALPHA8_OPAQUE)
    }
}

/// Clamp any unit-interval quantity to `0.0..=1.0`. NaN clamps to 0.
#[inline]
pub fn unit_clamp(x: f32) -> f32 {
    if x > 0.0 { x.min(1.0) } else { 0.0 }
}

/// Clamp a floating alpha to `0.0..=1.0`. NaN clamps to 0.
#[inline]
pub fn alpha_clamp(a: f32) -> f32 {
    unit_clamp(a)
}

/// Reduce an 8-bit alpha to the 5-bit range the 565 blender takes.
#[inline]
pub const fn alpha5(a: u8) -> u8 {
    a >> 3
}

/// Floating alpha to 5-bit, truncating.
#[inline]
pub fn alpha5_from_f32(a: f32) -> u8 {
    (alpha_clamp(a) * 31.0) as u8
}

/// Floating alpha to 8-bit, truncating.
#[inline]
pub fn alpha8_from_f32(a: f32) -> u8 {
    (alpha_clamp(a) * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_range() {
        assert_eq!(alpha_clamp(-0.5), 0.0);
        assert_eq!(alpha_clamp(0.25), 0.25);
        assert_eq!(alpha_clamp(3.0), 1.0);
        assert_eq!(alpha_clamp(f32::NAN), 0.0);
        for x in [-1.0, 0.0, 0.5, 1.0, 7.0, f32::NAN, f32::INFINITY] {
            assert_eq!(unit_clamp(x).to_bits(), alpha_clamp(x).to_bits());
        }
        assert_eq!(unit_clamp(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn alpha_precisions() {
        assert_eq!(alpha5(255), 31);
        assert_eq!(alpha5(7), 0);
        assert_eq!(alpha5(128), 16);
        assert_eq!(alpha5_from_f32(1.0), 31);
        assert_eq!(alpha5_from_f32(2.0), 31);
        assert_eq!(alpha5_from_f32(0.5), 15);
        assert_eq!(alpha8_from_f32(1.0), 255);
        assert_eq!(alpha8_from_f32(-1.0), 0);
        assert_eq!(alpha8_from_f32(0.5), 127);
    }

    #[test]
    fn sample_defaults() {
        assert_eq!(Sample565::opaque5(), Sample565::new(0, 31));
        assert_eq!(Sample565::opaque8().alpha, 255);
        assert_eq!(Sample565::default(), Sample565::new(0, 0));
    }
}
