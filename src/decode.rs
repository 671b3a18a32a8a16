//! Per-format pixel decoders.
//!
//! Every storage format is a unit type implementing [`Decode`], which reads
//! one pixel from raw bytes into each of the four working representations.
//! The [`access`](crate::access) tables are built from these associated
//! functions, so runtime dispatch and compile-time use share one
//! implementation.
//!
//! Contract shared by all decoders:
//!
//! - `px` starts at the pixel and holds at least
//!   [`byte_width`](crate::PixelFormat::byte_width) bytes (1 for Mono).
//! - `bit` is the Mono bit index, 0 = most significant (leftmost) pixel.
//!   Other formats ignore it.
//! - Formats without alpha never write the output alpha. Callers seed it.
//! - Every bit pattern decodes to something; there are no invalid pixels.

use rgb::Rgba;

use crate::PixelFormat;
use crate::color::{ARGB8888_BLACK, ARGB8888_WHITE, Color565, Color8888, Sample565};
use crate::convert::{expand4, expand5, expand6, gray_to_565, mono_to_565, rgb_to_565};

/// One storage format's decoders, one per working representation.
pub trait Decode {
    const FORMAT: PixelFormat;

    /// RGB565 color and 5-bit alpha (0–31).
    fn to_5565(px: &[u8], bit: u8, out: &mut Sample565);

    /// RGB565 color and 8-bit alpha (0–255).
    fn to_8565(px: &[u8], bit: u8, out: &mut Sample565);

    /// 8-bit components.
    fn to_rgba(px: &[u8], bit: u8, out: &mut Rgba<u8>);

    /// Packed ARGB8888. Formats without alpha come back opaque.
    fn to_8888(px: &[u8], bit: u8) -> Color8888;
}

#[inline(always)]
fn check_len<D: Decode>(px: &[u8], bit: u8) {
    debug_assert!(
        px.len() >= D::FORMAT.byte_width().max(1),
        "{} pixel needs {} bytes, got {}",
        D::FORMAT,
        D::FORMAT.byte_width().max(1),
        px.len()
    );
    debug_assert!(bit < 8 || D::FORMAT != PixelFormat::Mono, "mono bit index {bit} > 7");
}

#[inline(always)]
fn be16(px: &[u8]) -> u16 {
    u16::from_be_bytes([px[0], px[1]])
}

#[inline(always)]
fn be24(px: &[u8]) -> u32 {
    u32::from_be_bytes([0, px[0], px[1], px[2]])
}

/// Expand a 565 value into `out`'s color channels.
#[inline(always)]
fn rgb565_into(c: Color565, out: &mut Rgba<u8>) {
    out.r = expand5((c >> 11) as u8);
    out.g = expand6(((c >> 5) & 0x3F) as u8);
    out.b = expand5((c & 0x1F) as u8);
}

#[inline(always)]
fn rgb565_to_888(c: Color565) -> u32 {
    let r = expand5((c >> 11) as u8) as u32;
    let g = expand6(((c >> 5) & 0x3F) as u8) as u32;
    let b = expand5((c & 0x1F) as u8) as u32;
    (r << 16) | (g << 8) | b
}

// ===========================================================================
// RGB565
// ===========================================================================

/// `RRRRRGGG GGGBBBBB`
#[derive(Clone, Copy, Debug)]
pub struct Rgb565;

impl Decode for Rgb565 {
    const FORMAT: PixelFormat = PixelFormat::Rgb565;

    #[inline(always)]
    fn to_5565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        out.color = be16(px);
    }

    #[inline(always)]
    fn to_8565(px: &[u8], bit: u8, out: &mut Sample565) {
        Self::to_5565(px, bit, out);
    }

    #[inline(always)]
    fn to_rgba(px: &[u8], bit: u8, out: &mut Rgba<u8>) {
        check_len::<Self>(px, bit);
        rgb565_into(be16(px), out);
    }

    #[inline(always)]
    fn to_8888(px: &[u8], bit: u8) -> Color8888 {
        check_len::<Self>(px, bit);
        0xFF00_0000 | rgb565_to_888(be16(px))
    }
}

// ===========================================================================
// ARGB4444
// ===========================================================================

/// `AAAARRRR GGGGBBBB`
#[derive(Clone, Copy, Debug)]
pub struct Argb4444;

impl Argb4444 {
    /// Widen the 4-bit color channels straight to 565 by replication.
    #[inline(always)]
    fn color565(px: &[u8]) -> Color565 {
        let r = (px[0] & 0x0F) as u16;
        let g = (px[1] >> 4) as u16;
        let b = (px[1] & 0x0F) as u16;
        (((r << 1) | (r >> 3)) << 11) | (((g << 2) | (g >> 2)) << 5) | ((b << 1) | (b >> 3))
    }
}

impl Decode for Argb4444 {
    const FORMAT: PixelFormat = PixelFormat::Argb4444;

    #[inline(always)]
    fn to_5565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        let a = px[0] >> 4;
        out.alpha = (a << 1) | (a >> 3);
        out.color = Self::color565(px);
    }

    #[inline(always)]
    fn to_8565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        out.alpha = expand4(px[0] >> 4);
        out.color = Self::color565(px);
    }

    #[inline(always)]
    fn to_rgba(px: &[u8], bit: u8, out: &mut Rgba<u8>) {
        check_len::<Self>(px, bit);
        out.a = expand4(px[0] >> 4);
        out.r = expand4(px[0] & 0x0F);
        out.g = expand4(px[1] >> 4);
        out.b = expand4(px[1] & 0x0F);
    }

    #[inline(always)]
    fn to_8888(px: &[u8], bit: u8) -> Color8888 {
        check_len::<Self>(px, bit);
        // Spread each nibble into the low half of its byte, then copy it up.
        let v = u32::from(be16(px));
        let spread =
            ((v & 0xF000) << 12) | ((v & 0x0F00) << 8) | ((v & 0x00F0) << 4) | (v & 0x000F);
        (spread << 4) | spread
    }
}

// ===========================================================================
// ARGB6666
// ===========================================================================

/// `AAAAAARR RRRRGGGG GGBBBBBB`
#[derive(Clone, Copy, Debug)]
pub struct Argb6666;

impl Argb6666 {
    /// Split into 6-bit (a, r, g, b).
    #[inline(always)]
    fn channels(px: &[u8]) -> [u8; 4] {
        let v = be24(px);
        [
            (v >> 18) as u8 & 0x3F,
            (v >> 12) as u8 & 0x3F,
            (v >> 6) as u8 & 0x3F,
            v as u8 & 0x3F,
        ]
    }

    #[inline(always)]
    fn color565([_, r, g, b]: [u8; 4]) -> Color565 {
        ((r as u16 >> 1) << 11) | ((g as u16) << 5) | (b as u16 >> 1)
    }
}

impl Decode for Argb6666 {
    const FORMAT: PixelFormat = PixelFormat::Argb6666;

    #[inline(always)]
    fn to_5565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        let ch = Self::channels(px);
        out.alpha = ch[0] >> 1;
        out.color = Self::color565(ch);
    }

    #[inline(always)]
    fn to_8565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        let ch = Self::channels(px);
        out.alpha = expand6(ch[0]);
        out.color = Self::color565(ch);
    }

    #[inline(always)]
    fn to_rgba(px: &[u8], bit: u8, out: &mut Rgba<u8>) {
        check_len::<Self>(px, bit);
        let [a, r, g, b] = Self::channels(px);
        out.a = expand6(a);
        out.r = expand6(r);
        out.g = expand6(g);
        out.b = expand6(b);
    }

    #[inline(always)]
    fn to_8888(px: &[u8], bit: u8) -> Color8888 {
        check_len::<Self>(px, bit);
        let [a, r, g, b] = Self::channels(px).map(expand6);
        u32::from_be_bytes([a, r, g, b])
    }
}

// ===========================================================================
// ARGB8565
// ===========================================================================

/// Alpha byte, then RGB565 big-endian.
#[derive(Clone, Copy, Debug)]
pub struct Argb8565;

impl Decode for Argb8565 {
    const FORMAT: PixelFormat = PixelFormat::Argb8565;

    #[inline(always)]
    fn to_5565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        out.alpha = px[0] >> 3;
        out.color = be16(&px[1..]);
    }

    #[inline(always)]
    fn to_8565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        out.alpha = px[0];
        out.color = be16(&px[1..]);
    }

    #[inline(always)]
    fn to_rgba(px: &[u8], bit: u8, out: &mut Rgba<u8>) {
        check_len::<Self>(px, bit);
        out.a = px[0];
        rgb565_into(be16(&px[1..]), out);
    }

    #[inline(always)]
    fn to_8888(px: &[u8], bit: u8) -> Color8888 {
        check_len::<Self>(px, bit);
        (u32::from(px[0]) << 24) | rgb565_to_888(be16(&px[1..]))
    }
}

// ===========================================================================
// RGB888
// ===========================================================================

/// `R`, `G`, `B` bytes.
#[derive(Clone, Copy, Debug)]
pub struct Rgb888;

impl Decode for Rgb888 {
    const FORMAT: PixelFormat = PixelFormat::Rgb888;

    #[inline(always)]
    fn to_5565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        out.color = rgb_to_565(px[0], px[1], px[2]);
    }

    #[inline(always)]
    fn to_8565(px: &[u8], bit: u8, out: &mut Sample565) {
        Self::to_5565(px, bit, out);
    }

    #[inline(always)]
    fn to_rgba(px: &[u8], bit: u8, out: &mut Rgba<u8>) {
        check_len::<Self>(px, bit);
        out.r = px[0];
        out.g = px[1];
        out.b = px[2];
    }

    #[inline(always)]
    fn to_8888(px: &[u8], bit: u8) -> Color8888 {
        check_len::<Self>(px, bit);
        u32::from_be_bytes([0xFF, px[0], px[1], px[2]])
    }
}

// ===========================================================================
// ARGB8888
// ===========================================================================

/// `A`, `R`, `G`, `B` bytes.
#[derive(Clone, Copy, Debug)]
pub struct Argb8888;

impl Decode for Argb8888 {
    const FORMAT: PixelFormat = PixelFormat::Argb8888;

    #[inline(always)]
    fn to_5565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        out.alpha = px[0] >> 3;
        out.color = rgb_to_565(px[1], px[2], px[3]);
    }

    #[inline(always)]
    fn to_8565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        out.alpha = px[0];
        out.color = rgb_to_565(px[1], px[2], px[3]);
    }

    #[inline(always)]
    fn to_rgba(px: &[u8], bit: u8, out: &mut Rgba<u8>) {
        check_len::<Self>(px, bit);
        out.a = px[0];
        out.r = px[1];
        out.g = px[2];
        out.b = px[3];
    }

    #[inline(always)]
    fn to_8888(px: &[u8], bit: u8) -> Color8888 {
        check_len::<Self>(px, bit);
        u32::from_be_bytes([px[0], px[1], px[2], px[3]])
    }
}

// ===========================================================================
// Grayscale
// ===========================================================================

/// One intensity byte, broadcast to R, G and B.
#[derive(Clone, Copy, Debug)]
pub struct Gray8;

impl Decode for Gray8 {
    const FORMAT: PixelFormat = PixelFormat::Grayscale;

    #[inline(always)]
    fn to_5565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        out.color = gray_to_565(px[0]);
    }

    #[inline(always)]
    fn to_8565(px: &[u8], bit: u8, out: &mut Sample565) {
        Self::to_5565(px, bit, out);
    }

    #[inline(always)]
    fn to_rgba(px: &[u8], bit: u8, out: &mut Rgba<u8>) {
        check_len::<Self>(px, bit);
        out.r = px[0];
        out.g = px[0];
        out.b = px[0];
    }

    #[inline(always)]
    fn to_8888(px: &[u8], bit: u8) -> Color8888 {
        check_len::<Self>(px, bit);
        0xFF00_0000 | u32::from(px[0]) * 0x01_0101
    }
}

// ===========================================================================
// Mono
// ===========================================================================

/// One bit per pixel; `bit` selects it, 0 being the most significant.
///
/// Decodes to pure white or pure black only.
#[derive(Clone, Copy, Debug)]
pub struct Mono1;

impl Mono1 {
    #[inline(always)]
    fn lit(px: &[u8], bit: u8) -> u8 {
        (px[0] >> (7 - (bit & 7))) & 1
    }
}

impl Decode for Mono1 {
    const FORMAT: PixelFormat = PixelFormat::Mono;

    #[inline(always)]
    fn to_5565(px: &[u8], bit: u8, out: &mut Sample565) {
        check_len::<Self>(px, bit);
        out.color = mono_to_565(Self::lit(px, bit));
    }

    #[inline(always)]
    fn to_8565(px: &[u8], bit: u8, out: &mut Sample565) {
        Self::to_5565(px, bit, out);
    }

    #[inline(always)]
    fn to_rgba(px: &[u8], bit: u8, out: &mut Rgba<u8>) {
        check_len::<Self>(px, bit);
        let v = 0u8.wrapping_sub(Self::lit(px, bit));
        out.r = v;
        out.g = v;
        out.b = v;
    }

    #[inline(always)]
    fn to_8888(px: &[u8], bit: u8) -> Color8888 {
        check_len::<Self>(px, bit);
        if Self::lit(px, bit) != 0 { ARGB8888_WHITE } else { ARGB8888_BLACK }
    }
}
