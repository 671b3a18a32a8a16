//! Packed-integer alpha blending for the two working formats.
//!
//! Both families interpolate several channels with a single multiply by
//! spreading them across a `u32` so that each channel has enough zero bits
//! above it to absorb the product:
//!
//! ```text
//! RGB565 spread:  -----GGGGGG----- RRRRR------BBBBB   mask 0x07E0_F81F
//! RGB888 rb word: --------RRRRRRRR --------BBBBBBBB   mask 0x00FF_00FF
//! RGB888 g word:  ---------------- GGGGGGGG--------   mask 0x0000_FF00
//! ```
//!
//! `alpha` is always the weight of the foreground: 0 returns `bg` and the
//! precision's maximum (31 or 255) returns `fg`, bit for bit. In between each
//! channel is `bg + floor((fg - bg) * a / 2^n)` where the top alpha code is
//! promoted to `2^n` so it lands exactly on `fg`.
//!
//! Out-of-range alpha is a caller bug; it trips a debug assertion and yields
//! garbage in release builds.
//!
//! When one foreground is blended against many backgrounds (sprite fills,
//! text), prepare it once with [`prepare_565`] or [`prepare_888`] and use the
//! `blend_prepared_*` entry points. Re-prepare whenever the foreground
//! changes.

use rgb::Rgb;

use crate::color::{Color565, Color888};

const MASK_565: u32 = 0x07E0_F81F;
const MASK_RB: u32 = 0x00FF_00FF;
const MASK_G: u32 = 0x0000_FF00;

// ===========================================================================
// RGB565
// ===========================================================================

/// An RGB565 foreground already spread across a `u32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Prepared565(u32);

impl Prepared565 {
    /// Fold back to RGB565.
    #[inline]
    pub const fn color(self) -> Color565 {
        contract_565(self.0)
    }
}

#[inline(always)]
const fn spread_565(c: Color565) -> u32 {
    let c = c as u32;
    (c | (c << 16)) & MASK_565
}

#[inline(always)]
const fn contract_565(v: u32) -> Color565 {
    ((v >> 16) | v) as u16
}

/// 0..=31 to 0..=32.
#[inline(always)]
const fn weight5(alpha: u8) -> u32 {
    let a = alpha as u32;
    a + ((a + 1) >> 5)
}

#[inline(always)]
const fn lerp_spread_565(fg: u32, bg: u32, alpha: u8) -> Color565 {
    let v = ((fg.wrapping_sub(bg).wrapping_mul(weight5(alpha))) >> 5).wrapping_add(bg);
    contract_565(v & MASK_565)
}

#[inline]
pub const fn prepare_565(fg: Color565) -> Prepared565 {
    Prepared565(spread_565(fg))
}

/// Prepare an RGB888 foreground, truncating to 565 precision on the way.
#[inline]
pub const fn prepare_565_from_888(fg: Color888) -> Prepared565 {
    Prepared565(((fg & 0xF8_0000) >> 8) | ((fg & 0x00_FC00) << 11) | ((fg & 0x00_00F8) >> 3))
}

#[inline]
pub const fn prepare_565_from_rgb(r: u8, g: u8, b: u8) -> Prepared565 {
    prepare_565(crate::convert::rgb_to_565(r, g, b))
}

/// Blend RGB565 colors with 5-bit alpha (0..=31).
#[inline]
pub fn blend_5565(fg: Color565, bg: Color565, alpha: u8) -> Color565 {
    debug_assert!(alpha <= 31, "5-bit alpha out of range: {alpha}");
    lerp_spread_565(spread_565(fg), spread_565(bg), alpha)
}

/// Blend RGB565 colors with 8-bit alpha. Only the top 5 bits of `alpha`
/// are used.
#[inline]
pub fn blend_8565(fg: Color565, bg: Color565, alpha: u8) -> Color565 {
    lerp_spread_565(spread_565(fg), spread_565(bg), alpha >> 3)
}

#[inline]
pub fn blend_prepared_5565(fg: Prepared565, bg: Color565, alpha: u8) -> Color565 {
    debug_assert!(alpha <= 31, "5-bit alpha out of range: {alpha}");
    debug_assert_eq!(fg.0 & !MASK_565, 0, "Prepared565 was not built by prepare_565");
    lerp_spread_565(fg.0, spread_565(bg), alpha)
}

#[inline]
pub fn blend_prepared_8565(fg: Prepared565, bg: Color565, alpha: u8) -> Color565 {
    blend_prepared_5565(fg, bg, alpha >> 3)
}

// ===========================================================================
// RGB888
// ===========================================================================

/// An RGB888 foreground split into its red/blue and green words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Prepared888 {
    rb: u32,
    g: u32,
}

impl Prepared888 {
    #[inline]
    pub const fn color(self) -> Color888 {
        self.rb | self.g
    }
}

/// 0..=255 to 0..=256.
#[inline(always)]
const fn weight8(alpha: u8) -> u32 {
    let a = alpha as u32;
    a + ((a + 1) >> 8)
}

#[inline(always)]
const fn lerp_word(fg: u32, bg: u32, a: u32, mask: u32) -> u32 {
    (bg.wrapping_add(fg.wrapping_sub(bg).wrapping_mul(a) >> 8)) & mask
}

#[inline(always)]
const fn lerp_888(fg: Prepared888, bg: Color888, alpha: u8) -> Color888 {
    let a = weight8(alpha);
    lerp_word(fg.rb, bg & MASK_RB, a, MASK_RB) | lerp_word(fg.g, bg & MASK_G, a, MASK_G)
}

/// Split an RGB888 foreground. The upper byte is ignored.
#[inline]
pub const fn prepare_888(fg: Color888) -> Prepared888 {
    Prepared888 {
        rb: fg & MASK_RB,
        g: fg & MASK_G,
    }
}

#[inline]
pub const fn prepare_888_from_rgb(r: u8, g: u8, b: u8) -> Prepared888 {
    Prepared888 {
        rb: ((r as u32) << 16) | b as u32,
        g: (g as u32) << 8,
    }
}

/// Blend RGB888 colors with 8-bit alpha. Upper bytes are ignored and the
/// result's upper byte is 0.
#[inline]
pub const fn blend_888(fg: Color888, bg: Color888, alpha: u8) -> Color888 {
    lerp_888(prepare_888(fg), bg, alpha)
}

#[inline]
pub fn blend_prepared_888(fg: Prepared888, bg: Color888, alpha: u8) -> Color888 {
    debug_assert!(
        fg.rb & !MASK_RB == 0 && fg.g & !MASK_G == 0,
        "Prepared888 was not built by prepare_888"
    );
    lerp_888(fg, bg, alpha)
}

/// Blend separately stored components, with the same arithmetic as
/// [`blend_888`].
#[inline]
pub fn blend_rgb(fg: Rgb<u8>, bg: Rgb<u8>, alpha: u8) -> Rgb<u8> {
    let fg = prepare_888_from_rgb(fg.r, fg.g, fg.b);
    let bg = crate::convert::rgb_to_888(bg.r, bg.g, bg.b);
    crate::convert::rgb888_to_rgb(lerp_888(fg, bg, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Deterministic spread of colors, including the extremes.
    fn colors(n: usize) -> Vec<u32> {
        let mut state = 0x2545_F491u32;
        let mut out: Vec<u32> = Vec::from([0, 0xFFFF_FFFF, 0x00FF_00FF, 0x0000_FF00]);
        out.extend((0..n).map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state
        }));
        out
    }

    fn ref_channel(fg: i32, bg: i32, weight: i32, shift: u32) -> i32 {
        bg + ((fg - bg) * weight).div_euclid(1 << shift)
    }

    fn ref_565(fg: u16, bg: u16, alpha: u8) -> u16 {
        let w = weight5(alpha) as i32;
        let ch = |c: u16, shift: u32, mask: u16| i32::from((c >> shift) & mask);
        let r = ref_channel(ch(fg, 11, 0x1F), ch(bg, 11, 0x1F), w, 5);
        let g = ref_channel(ch(fg, 5, 0x3F), ch(bg, 5, 0x3F), w, 5);
        let b = ref_channel(ch(fg, 0, 0x1F), ch(bg, 0, 0x1F), w, 5);
        ((r << 11) | (g << 5) | b) as u16
    }

    fn ref_888(fg: u32, bg: u32, alpha: u8) -> u32 {
        let w = weight8(alpha) as i32;
        let ch = |c: u32, shift: u32| ((c >> shift) & 0xFF) as i32;
        let r = ref_channel(ch(fg, 16), ch(bg, 16), w, 8);
        let g = ref_channel(ch(fg, 8), ch(bg, 8), w, 8);
        let b = ref_channel(ch(fg, 0), ch(bg, 0), w, 8);
        ((r << 16) | (g << 8) | b) as u32
    }

    #[test]
    fn pinned_midpoints() {
        assert_eq!(blend_888(0xFF_0000, 0x00_00FF, 128), 0x7F_007F);
        assert_eq!(blend_5565(0xFFFF, 0x0000, 16), 0x7BEF);
        assert_eq!(blend_5565(0x0000, 0xFFFF, 16), 0x7BEF);
        assert_eq!(
            blend_rgb(Rgb::new(255, 0, 0), Rgb::new(0, 0, 255), 128),
            Rgb::new(0x7F, 0, 0x7F)
        );
    }

    #[test]
    fn identity_565() {
        let cs = colors(200);
        for &f in &cs {
            for &b in &cs {
                let (f, b) = (f as u16, b as u16);
                assert_eq!(blend_5565(f, b, 0), b);
                assert_eq!(blend_5565(f, b, 31), f);
                assert_eq!(blend_8565(f, b, 0), b);
                assert_eq!(blend_8565(f, b, 255), f);
                let p = prepare_565(f);
                assert_eq!(blend_prepared_5565(p, b, 0), b);
                assert_eq!(blend_prepared_5565(p, b, 31), f);
                assert_eq!(blend_prepared_8565(p, b, 255), f);
            }
        }
    }

    #[test]
    fn identity_888() {
        let cs = colors(200);
        for &f in &cs {
            for &b in &cs {
                assert_eq!(blend_888(f, b, 0), b & 0xFF_FFFF);
                assert_eq!(blend_888(f, b, 255), f & 0xFF_FFFF);
                let p = prepare_888(f);
                assert_eq!(blend_prepared_888(p, b, 0), b & 0xFF_FFFF);
                assert_eq!(blend_prepared_888(p, b, 255), f & 0xFF_FFFF);
            }
        }
    }

    #[test]
    fn packed_565_matches_per_channel() {
        let cs = colors(64);
        for &f in &cs {
            for &b in &cs {
                for a in 0..=31 {
                    let (f, b) = (f as u16, b as u16);
                    assert_eq!(blend_5565(f, b, a), ref_565(f, b, a), "{f:#06x} {b:#06x} a={a}");
                }
            }
        }
    }

    #[test]
    fn packed_888_matches_per_channel() {
        let cs = colors(40);
        for &f in &cs {
            for &b in &cs {
                for a in (0..=255).step_by(7).chain([128, 254, 255]) {
                    let (f24, b24) = (f & 0xFF_FFFF, b & 0xFF_FFFF);
                    assert_eq!(blend_888(f, b, a), ref_888(f24, b24, a), "{f:#08x} {b:#08x} a={a}");
                }
            }
        }
    }

    #[test]
    fn prepared_agrees_with_direct() {
        let cs = colors(50);
        for &f in &cs {
            let p5 = prepare_565(f as u16);
            let p8 = prepare_888(f);
            assert_eq!(p5.color(), f as u16);
            assert_eq!(p8.color(), f & 0xFF_FFFF);
            for &b in &cs {
                for a in [1, 8, 15, 16, 30] {
                    assert_eq!(blend_prepared_5565(p5, b as u16, a), blend_5565(f as u16, b as u16, a));
                }
                for a in [1, 64, 127, 200, 254] {
                    assert_eq!(blend_prepared_888(p8, b, a), blend_888(f, b, a));
                }
            }
        }
    }

    #[test]
    fn prepare_from_other_sources() {
        for &c in &colors(100) {
            let c24 = c & 0xFF_FFFF;
            let as565 = crate::convert::rgb888_to_565(c24);
            assert_eq!(prepare_565_from_888(c), prepare_565(as565));
            let rgb = crate::convert::rgb888_to_rgb(c24);
            assert_eq!(prepare_565_from_rgb(rgb.r, rgb.g, rgb.b), prepare_565(as565));
            assert_eq!(prepare_888_from_rgb(rgb.r, rgb.g, rgb.b), prepare_888(c));
        }
    }

    #[test]
    fn component_blend_matches_packed() {
        for &f in &colors(30) {
            for &b in &colors(30) {
                for a in [0, 1, 77, 128, 200, 255] {
                    let fc = crate::convert::rgb888_to_rgb(f);
                    let bc = crate::convert::rgb888_to_rgb(b);
                    let packed = crate::convert::rgb888_to_rgb(blend_888(f, b, a));
                    assert_eq!(blend_rgb(fc, bc, a), packed);
                }
            }
        }
    }
}
