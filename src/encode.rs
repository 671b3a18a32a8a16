//! Per-format pixel encoders, the inverse of [`decode`](crate::decode).
//!
//! Encoding truncates each channel to the format's precision. Decoding a
//! stored pixel and encoding it again reproduces the stored bytes exactly,
//! for every format and every bit pattern.
//!
//! Byte order matches the decoders: most significant byte (alpha, when
//! present) first.

use rgb::Rgba;

use crate::PixelFormat;
use crate::convert::rgb_to_565;
use crate::decode::{Argb4444, Argb6666, Argb8565, Argb8888, Decode, Gray8, Mono1, Rgb565, Rgb888};

/// Writes one pixel into the start of `out`. `bit` selects the Mono bit.
pub type EncodeFn = fn(px: Rgba<u8>, out: &mut [u8], bit: u8);

pub trait Encode: Decode {
    /// Write `px` at the start of `out`. Formats without alpha drop `px.a`.
    ///
    /// Mono sets or clears bit `bit` (0 = most significant) and leaves the
    /// other seven bits of the byte alone.
    fn encode(px: Rgba<u8>, out: &mut [u8], bit: u8);
}

/// Integer Rec.601 luma, rounded: `(77 r + 150 g + 29 b + 128) >> 8`.
///
/// The weights sum to 256, so gray input comes back unchanged.
#[inline]
pub const fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 77 + g as u32 * 150 + b as u32 * 29 + 128) >> 8) as u8
}

#[inline(always)]
fn check_len<E: Encode>(out: &[u8]) {
    debug_assert!(
        out.len() >= E::FORMAT.byte_width().max(1),
        "{} pixel needs {} bytes, got {}",
        E::FORMAT,
        E::FORMAT.byte_width().max(1),
        out.len()
    );
}

impl Encode for Rgb565 {
    #[inline(always)]
    fn encode(px: Rgba<u8>, out: &mut [u8], _bit: u8) {
        check_len::<Self>(out);
        out[..2].copy_from_slice(&rgb_to_565(px.r, px.g, px.b).to_be_bytes());
    }
}

impl Encode for Argb4444 {
    #[inline(always)]
    fn encode(px: Rgba<u8>, out: &mut [u8], _bit: u8) {
        check_len::<Self>(out);
        out[0] = (px.a & 0xF0) | (px.r >> 4);
        out[1] = (px.g & 0xF0) | (px.b >> 4);
    }
}

impl Encode for Argb6666 {
    #[inline(always)]
    fn encode(px: Rgba<u8>, out: &mut [u8], _bit: u8) {
        check_len::<Self>(out);
        let v = (u32::from(px.a >> 2) << 18)
            | (u32::from(px.r >> 2) << 12)
            | (u32::from(px.g >> 2) << 6)
            | u32::from(px.b >> 2);
        out[..3].copy_from_slice(&v.to_be_bytes()[1..]);
    }
}

impl Encode for Argb8565 {
    #[inline(always)]
    fn encode(px: Rgba<u8>, out: &mut [u8], _bit: u8) {
        check_len::<Self>(out);
        out[0] = px.a;
        out[1..3].copy_from_slice(&rgb_to_565(px.r, px.g, px.b).to_be_bytes());
    }
}

impl Encode for Rgb888 {
    #[inline(always)]
    fn encode(px: Rgba<u8>, out: &mut [u8], _bit: u8) {
        check_len::<Self>(out);
        out[..3].copy_from_slice(&[px.r, px.g, px.b]);
    }
}

impl Encode for Argb8888 {
    #[inline(always)]
    fn encode(px: Rgba<u8>, out: &mut [u8], _bit: u8) {
        check_len::<Self>(out);
        out[..4].copy_from_slice(&[px.a, px.r, px.g, px.b]);
    }
}

impl Encode for Gray8 {
    #[inline(always)]
    fn encode(px: Rgba<u8>, out: &mut [u8], _bit: u8) {
        check_len::<Self>(out);
        out[0] = luma(px.r, px.g, px.b);
    }
}

impl Encode for Mono1 {
    /// Lit when luma is at least 128.
    #[inline(always)]
    fn encode(px: Rgba<u8>, out: &mut [u8], bit: u8) {
        check_len::<Self>(out);
        debug_assert!(bit < 8, "mono bit index {bit} > 7");
        let mask = 0x80 >> (bit & 7);
        if luma(px.r, px.g, px.b) >= 128 {
            out[0] |= mask;
        } else {
            out[0] &= !mask;
        }
    }
}

static ENCODERS: [Option<EncodeFn>; PixelFormat::COUNT] = [
    None,
    Some(<Rgb565 as Encode>::encode as EncodeFn),
    Some(<Argb4444 as Encode>::encode as EncodeFn),
    Some(<Argb6666 as Encode>::encode as EncodeFn),
    Some(<Argb8565 as Encode>::encode as EncodeFn),
    Some(<Rgb888 as Encode>::encode as EncodeFn),
    Some(<Argb8888 as Encode>::encode as EncodeFn),
    None,
    Some(<Mono1 as Encode>::encode as EncodeFn),
    Some(<Gray8 as Encode>::encode as EncodeFn),
];

/// Encoder for `format`; `None` for Indexed and Unknown.
#[inline]
pub fn encoder(format: PixelFormat) -> Option<EncodeFn> {
    ENCODERS[format.index()]
}
