//! Explicit format-to-format conversions for known pairs.
//!
//! These are the compile-time-chosen counterparts of the [`access`](crate::access)
//! tables: use them when the source format is fixed in code rather than read
//! from an asset.
//!
//! Narrow channels are widened by replicating their high bits into the new low
//! bits (`expand5(v) = v << 3 | v >> 2`), so 0 and full scale survive the trip
//! to 8 bits exactly.

use rgb::{Rgb, Rgba};

use crate::color::{
    ARGB8888_BLACK, ARGB8888_WHITE, Color565, Color888, Color8888, RGB565_BLACK, RGB565_WHITE,
    RGB888_BLACK, RGB888_WHITE, Sample565,
};

// ===========================================================================
// Channel expansion
// ===========================================================================

/// 4-bit channel to 8 bits.
#[inline(always)]
pub const fn expand4(v: u8) -> u8 {
    (v << 4) | (v & 0x0F)
}

/// 5-bit channel to 8 bits.
#[inline(always)]
pub const fn expand5(v: u8) -> u8 {
    (v << 3) | (v >> 2)
}

/// 6-bit channel to 8 bits.
#[inline(always)]
pub const fn expand6(v: u8) -> u8 {
    (v << 2) | (v >> 4)
}

// ===========================================================================
// → RGB565
// ===========================================================================

/// Pack 8-bit components into RGB565, truncating the low bits.
#[inline(always)]
pub const fn rgb_to_565(r: u8, g: u8, b: u8) -> Color565 {
    (((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3)
}

/// RGB888 (upper byte ignored) to RGB565.
#[inline(always)]
pub const fn rgb888_to_565(c: Color888) -> Color565 {
    (((c >> 8) & 0xF800) | ((c >> 5) & 0x07E0) | ((c >> 3) & 0x001F)) as u16
}

/// ARGB8888 to RGB565 with the 8-bit alpha kept as is.
#[inline(always)]
pub const fn argb8888_to_8565(c: Color8888) -> Sample565 {
    Sample565::new(rgb888_to_565(c), (c >> 24) as u8)
}

/// ARGB8888 to RGB565 with alpha reduced to 5 bits.
#[inline(always)]
pub const fn argb8888_to_5565(c: Color8888) -> Sample565 {
    Sample565::new(rgb888_to_565(c), (c >> 27) as u8)
}

/// Grayscale intensity to RGB565.
#[inline(always)]
pub const fn gray_to_565(v: u8) -> Color565 {
    rgb_to_565(v, v, v)
}

/// Mono bit (only bit 0 is looked at) to white or black.
#[inline(always)]
pub const fn mono_to_565(bit: u8) -> Color565 {
    if bit & 1 != 0 { RGB565_WHITE } else { RGB565_BLACK }
}

// ===========================================================================
// → 8-bit components
// ===========================================================================

/// Split RGB565 into 8-bit components with bit replication.
#[inline(always)]
pub const fn rgb565_to_rgb(c: Color565) -> Rgb<u8> {
    Rgb {
        r: expand5((c >> 11) as u8),
        g: expand6(((c >> 5) & 0x3F) as u8),
        b: expand5((c & 0x1F) as u8),
    }
}

#[inline(always)]
pub const fn rgb888_to_rgb(c: Color888) -> Rgb<u8> {
    Rgb {
        r: (c >> 16) as u8,
        g: (c >> 8) as u8,
        b: c as u8,
    }
}

#[inline(always)]
pub const fn argb8888_to_rgba(c: Color8888) -> Rgba<u8> {
    Rgba {
        r: (c >> 16) as u8,
        g: (c >> 8) as u8,
        b: c as u8,
        a: (c >> 24) as u8,
    }
}

#[inline(always)]
pub const fn gray_to_rgb(v: u8) -> Rgb<u8> {
    Rgb { r: v, g: v, b: v }
}

#[inline(always)]
pub const fn mono_to_rgb(bit: u8) -> Rgb<u8> {
    gray_to_rgb(if bit & 1 != 0 { 0xFF } else { 0x00 })
}

// ===========================================================================
// → RGB888 / ARGB8888
// ===========================================================================

#[inline(always)]
pub const fn rgb_to_888(r: u8, g: u8, b: u8) -> Color888 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline(always)]
pub const fn rgba_to_8888(px: Rgba<u8>) -> Color8888 {
    ((px.a as u32) << 24) | rgb_to_888(px.r, px.g, px.b)
}

/// RGB565 to RGB888 with bit replication: `0xFFFF` becomes `0xFFFFFF`.
#[inline(always)]
pub const fn rgb565_to_888(c: Color565) -> Color888 {
    let Rgb { r, g, b } = rgb565_to_rgb(c);
    rgb_to_888(r, g, b)
}

/// RGB565 to RGB888 with zero-filled low bits.
///
/// This is the exact inverse of [`rgb_to_565`] for components whose low 3
/// (red, blue) or 2 (green) bits are already zero. White comes back as
/// `0xF8FCF8`; prefer [`rgb565_to_888`] for display.
#[inline(always)]
pub const fn rgb565_to_888_truncated(c: Color565) -> Color888 {
    let c = c as u32;
    ((c & 0xF800) << 8) | ((c & 0x07E0) << 5) | ((c & 0x001F) << 3)
}

#[inline(always)]
pub const fn gray_to_888(v: u8) -> Color888 {
    (v as u32) * 0x01_0101
}

#[inline(always)]
pub const fn mono_to_888(bit: u8) -> Color888 {
    if bit & 1 != 0 { RGB888_WHITE } else { RGB888_BLACK }
}

/// Opaque ARGB8888 from RGB565.
#[inline(always)]
pub const fn rgb565_to_8888(c: Color565) -> Color8888 {
    0xFF00_0000 | rgb565_to_888(c)
}

/// RGB565 with 8-bit alpha back to ARGB8888, the inverse direction of
/// [`argb8888_to_8565`]. Color bits are replicated like [`rgb565_to_888`].
#[inline(always)]
pub const fn argb8565_to_8888(s: Sample565) -> Color8888 {
    ((s.alpha as u32) << 24) | rgb565_to_888(s.color)
}

#[inline(always)]
pub const fn mono_to_8888(bit: u8) -> Color8888 {
    if bit & 1 != 0 { ARGB8888_WHITE } else { ARGB8888_BLACK }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_extremes_and_midpoints() {
        assert_eq!(expand5(0), 0);
        assert_eq!(expand5(31), 255);
        assert_eq!(expand5(16), 132);
        assert_eq!(expand6(0), 0);
        assert_eq!(expand6(63), 255);
        assert_eq!(expand6(32), 130);
        assert_eq!(expand4(0), 0);
        assert_eq!(expand4(15), 255);
        assert_eq!(expand4(8), 0x88);
    }

    #[test]
    fn pack_565() {
        assert_eq!(rgb_to_565(255, 255, 255), 0xFFFF);
        assert_eq!(rgb_to_565(255, 0, 0), 0xF800);
        assert_eq!(rgb_to_565(0, 255, 0), 0x07E0);
        assert_eq!(rgb_to_565(0, 0, 255), 0x001F);
        assert_eq!(rgb_to_565(255, 0, 255), crate::color::RGB565_TRANSPARENT);
        assert_eq!(rgb888_to_565(0xFF_C0CB), 0xFE19);
        assert_eq!(rgb888_to_565(0xAB_FF_C0CB), 0xFE19);
        assert_eq!(gray_to_565(0x80), 0x8410);
        assert_eq!(mono_to_565(1), 0xFFFF);
        assert_eq!(mono_to_565(2), 0x0000);
    }

    #[test]
    fn argb_to_8565_and_5565() {
        let s = argb8888_to_8565(0x80FF_0000);
        assert_eq!(s, Sample565::new(0xF800, 0x80));
        let s = argb8888_to_5565(0xFF00_FF00);
        assert_eq!(s, Sample565::new(0x07E0, 31));
        let s = argb8888_to_5565(0x0700_0000);
        assert_eq!(s.alpha, 0);
    }

    #[test]
    fn sample_8565_back_to_8888() {
        assert_eq!(argb8565_to_8888(Sample565::new(0xF800, 0x80)), 0x80FF_0000);
        assert_eq!(argb8565_to_8888(Sample565::new(0x8410, 0)), 0x0084_8284);
        use crate::decode::{Argb8565, Decode};
        // Agrees with the stored-format decoder byte for byte.
        for (a, c) in [(0x00u8, 0x0000u16), (0x7F, 0x1234), (0xFF, 0xFFFF), (0x42, 0xF81F)] {
            let [hi, lo] = c.to_be_bytes();
            let stored = Argb8565::to_8888(&[a, hi, lo], 0);
            assert_eq!(argb8565_to_8888(Sample565::new(c, a)), stored);
        }
        // Lossless for 8888 values already at 565 precision.
        for c in [0xFF00_0000u32, 0x80F8_FCF8, 0x1208_0408] {
            let back = argb8565_to_8888(argb8888_to_8565(c));
            assert_eq!(back & 0xFFF8_FCF8, c);
        }
    }

    #[test]
    fn rgb565_to_components() {
        assert_eq!(rgb565_to_rgb(0xFFFF), Rgb::new(255, 255, 255));
        assert_eq!(rgb565_to_rgb(0x0000), Rgb::new(0, 0, 0));
        assert_eq!(rgb565_to_rgb(16 << 11), Rgb::new(132, 0, 0));
        assert_eq!(rgb565_to_rgb(0x07E0), Rgb::new(0, 255, 0));
        assert_eq!(rgb565_to_888(0xFFFF), 0xFF_FFFF);
        assert_eq!(rgb565_to_888(0x8410), 0x84_8284);
        assert_eq!(rgb565_to_8888(0x001F), 0xFF00_00FF);
    }

    #[test]
    fn every_565_survives_888() {
        for c in 0..=u16::MAX {
            assert_eq!(rgb888_to_565(rgb565_to_888(c)), c, "{c:#06x}");
            assert_eq!(rgb888_to_565(rgb565_to_888_truncated(c)), c, "{c:#06x}");
        }
    }

    #[test]
    fn aligned_components_round_trip_exactly() {
        for r in (0..=248u8).step_by(8) {
            for g in (0..=252u8).step_by(4) {
                for b in (0..=248u8).step_by(8) {
                    let c = rgb_to_565(r, g, b);
                    assert_eq!(rgb565_to_888_truncated(c), rgb_to_888(r, g, b));
                }
            }
        }
    }

    #[test]
    fn loss_is_confined_to_low_bits() {
        for v in [0u32, 0x12_3456, 0x7F_8081, 0xFF_FFFF, 0x01_0203] {
            let back = rgb565_to_888(rgb888_to_565(v));
            assert_eq!(back & 0xF8_FCF8, v & 0xF8_FCF8, "{v:#08x}");
        }
    }

    #[test]
    fn gray_and_mono_broadcast() {
        assert_eq!(gray_to_888(0x42), 0x42_4242);
        assert_eq!(gray_to_rgb(7), Rgb::new(7, 7, 7));
        assert_eq!(mono_to_888(1), 0xFF_FFFF);
        assert_eq!(mono_to_888(0), 0);
        assert_eq!(mono_to_rgb(1), Rgb::new(255, 255, 255));
        assert_eq!(mono_to_8888(0), 0xFF00_0000);
    }

    #[test]
    fn packed_component_split() {
        assert_eq!(rgb888_to_rgb(0x12_3456), Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(
            argb8888_to_rgba(0x9A12_3456),
            Rgba::new(0x12, 0x34, 0x56, 0x9A)
        );
        assert_eq!(rgba_to_8888(Rgba::new(1, 2, 3, 4)), 0x0401_0203);
        assert_eq!(rgb_to_888(0xAB, 0xCD, 0xEF), 0xAB_CDEF);
    }
}
