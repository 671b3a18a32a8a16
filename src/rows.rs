// ---------------------------------------------------------------------------
// Row-level decode, encode and blend with SIMD dispatch.
//
// Architecture: #[inline(always)] kernels hold the per-row loops and are
// generic over the pixel format, so each format gets its own loop with the
// pixel routine inlined. Per-tier #[arcane] wrappers match on the format
// once and compile the chosen kernel under that tier's target features;
// incant! picks a tier once per call. Lengths and format support are
// validated before dispatch.
// ---------------------------------------------------------------------------

//! Whole-row operations over the per-pixel core.
//!
//! Every function validates its slices up front and returns [`SizeError`]
//! instead of panicking. Formats without a decoder (Indexed, Unknown) are
//! rejected with [`SizeError::Unsupported`].
//!
//! Source rows are counted in pixels of the source format, except Mono,
//! whose pixel count is taken from the destination (a Mono byte holds 8
//! pixels and the last byte of a row may be partly padding).
//!
//! ```rust
//! use swatch::{PixelFormat, rows};
//!
//! let src = [0xF8, 0x00, 0x07, 0xE0]; // red, green as RGB565
//! let mut out = [0u32; 2];
//! rows::decode_row_8888(PixelFormat::Rgb565, &src, &mut out).unwrap();
//! assert_eq!(out, [0xFFFF_0000, 0xFF00_FF00]);
//! ```

use archmage::incant;
use archmage::prelude::*;
use rgb::Rgba;

use crate::blend::{Prepared565, Prepared888, blend_5565, blend_prepared_5565, blend_prepared_888};
use crate::color::{Color565, Color888, Color8888, Sample565};
use crate::decode::{
    Argb4444, Argb6666, Argb8565, Argb8888, Decode, Gray8, Mono1, Rgb565, Rgb888,
};
use crate::encode::Encode;
use crate::{PixelFormat, SizeError};

/// Evaluate `$body` with `$P` naming the pixel type of `$format`.
///
/// Indexed and Unknown do nothing; callers reject them before dispatch.
macro_rules! with_pixel_type {
    ($format:expr, $P:ident => $body:expr) => {
        match $format {
            PixelFormat::Rgb565 => {
                type $P = Rgb565;
                $body
            }
            PixelFormat::Argb4444 => {
                type $P = Argb4444;
                $body
            }
            PixelFormat::Argb6666 => {
                type $P = Argb6666;
                $body
            }
            PixelFormat::Argb8565 => {
                type $P = Argb8565;
                $body
            }
            PixelFormat::Rgb888 => {
                type $P = Rgb888;
                $body
            }
            PixelFormat::Argb8888 => {
                type $P = Argb8888;
                $body
            }
            PixelFormat::Mono => {
                type $P = Mono1;
                $body
            }
            PixelFormat::Grayscale => {
                type $P = Gray8;
                $body
            }
            PixelFormat::Indexed | PixelFormat::Unknown => {}
        }
    };
}

// ===========================================================================
// Validation helpers
// ===========================================================================

#[inline]
fn check_format(format: PixelFormat) -> Result<(), SizeError> {
    match format {
        PixelFormat::Indexed | PixelFormat::Unknown => Err(SizeError::Unsupported(format)),
        _ => Ok(()),
    }
}

/// Number of pixels a row of `src_len` bytes yields into `dst_px` slots.
#[inline]
fn decode_count(format: PixelFormat, src_len: usize, dst_px: usize) -> Result<usize, SizeError> {
    check_format(format)?;
    let bw = format.byte_width();
    if bw == 0 {
        if dst_px == 0 {
            return Err(SizeError::NotPixelAligned);
        }
        if src_len < dst_px.div_ceil(8) {
            return Err(SizeError::PixelCountMismatch);
        }
        return Ok(dst_px);
    }
    if src_len == 0 || !src_len.is_multiple_of(bw) {
        return Err(SizeError::NotPixelAligned);
    }
    let n = src_len / bw;
    if dst_px < n {
        return Err(SizeError::PixelCountMismatch);
    }
    Ok(n)
}

#[inline]
fn check_inplace(len: usize) -> Result<(), SizeError> {
    if len == 0 {
        Err(SizeError::NotPixelAligned)
    } else {
        Ok(())
    }
}

/// Byte offset and Mono bit of pixel `i`.
#[inline(always)]
fn locate(bw: usize, i: usize) -> (usize, u8) {
    if bw == 0 {
        (i / 8, (i % 8) as u8)
    } else {
        (i * bw, 0)
    }
}

// ===========================================================================
// Kernels
// ===========================================================================

#[inline(always)]
fn decode_8888_kernel<D: Decode>(src: &[u8], dst: &mut [Color8888]) {
    let bw = D::FORMAT.byte_width();
    for (i, d) in dst.iter_mut().enumerate() {
        let (off, bit) = locate(bw, i);
        *d = D::to_8888(&src[off..], bit);
    }
}

#[inline(always)]
fn decode_rgba_kernel<D: Decode>(src: &[u8], dst: &mut [Rgba<u8>]) {
    let bw = D::FORMAT.byte_width();
    for (i, d) in dst.iter_mut().enumerate() {
        let (off, bit) = locate(bw, i);
        D::to_rgba(&src[off..], bit, d);
    }
}

#[inline(always)]
fn decode_565_kernel<D: Decode>(src: &[u8], dst: &mut [Color565]) {
    let bw = D::FORMAT.byte_width();
    let mut s = Sample565::default();
    for (i, d) in dst.iter_mut().enumerate() {
        let (off, bit) = locate(bw, i);
        D::to_5565(&src[off..], bit, &mut s);
        *d = s.color;
    }
}

#[inline(always)]
fn composite_565_kernel<D: Decode>(src: &[u8], dst: &mut [Color565]) {
    let bw = D::FORMAT.byte_width();
    let mut s = Sample565::opaque5();
    for (i, d) in dst.iter_mut().enumerate() {
        let (off, bit) = locate(bw, i);
        D::to_5565(&src[off..], bit, &mut s);
        *d = blend_5565(s.color, *d, s.alpha);
    }
}

#[inline(always)]
fn blend_565_kernel(fg: Prepared565, dst: &mut [Color565], alpha: u8) {
    for d in dst.iter_mut() {
        *d = blend_prepared_5565(fg, *d, alpha);
    }
}

#[inline(always)]
fn blend_888_kernel(fg: Prepared888, dst: &mut [Color888], alpha: u8) {
    for d in dst.iter_mut() {
        *d = blend_prepared_888(fg, *d, alpha);
    }
}

#[inline(always)]
fn encode_kernel<E: Encode>(src: &[Rgba<u8>], dst: &mut [u8]) {
    let bw = E::FORMAT.byte_width();
    for (i, &px) in src.iter().enumerate() {
        let (off, bit) = locate(bw, i);
        E::encode(px, &mut dst[off..], bit);
    }
}

// ===========================================================================
// Scalar wrappers (dispatch targets for incant!)
// ===========================================================================

fn decode_8888_impl_scalar(_t: ScalarToken, f: PixelFormat, s: &[u8], d: &mut [u32]) {
    with_pixel_type!(f, P => decode_8888_kernel::<P>(s, d));
}
fn decode_rgba_impl_scalar(_t: ScalarToken, f: PixelFormat, s: &[u8], d: &mut [Rgba<u8>]) {
    with_pixel_type!(f, P => decode_rgba_kernel::<P>(s, d));
}
fn decode_565_impl_scalar(_t: ScalarToken, f: PixelFormat, s: &[u8], d: &mut [u16]) {
    with_pixel_type!(f, P => decode_565_kernel::<P>(s, d));
}
fn composite_565_impl_scalar(_t: ScalarToken, f: PixelFormat, s: &[u8], d: &mut [u16]) {
    with_pixel_type!(f, P => composite_565_kernel::<P>(s, d));
}
fn blend_565_impl_scalar(_t: ScalarToken, fg: Prepared565, d: &mut [u16], a: u8) {
    blend_565_kernel(fg, d, a);
}
fn blend_888_impl_scalar(_t: ScalarToken, fg: Prepared888, d: &mut [u32], a: u8) {
    blend_888_kernel(fg, d, a);
}
fn encode_impl_scalar(_t: ScalarToken, f: PixelFormat, s: &[Rgba<u8>], d: &mut [u8]) {
    with_pixel_type!(f, P => encode_kernel::<P>(s, d));
}

// ===========================================================================
// x86-64 arcane wrappers
// ===========================================================================
#[cfg(target_arch = "x86_64")]
#[arcane]
fn decode_8888_impl_v3(_t: X64V3Token, f: PixelFormat, s: &[u8], d: &mut [u32]) {
    with_pixel_type!(f, P => decode_8888_kernel::<P>(s, d));
}
#[cfg(target_arch = "x86_64")]
#[arcane]
fn decode_rgba_impl_v3(_t: X64V3Token, f: PixelFormat, s: &[u8], d: &mut [Rgba<u8>]) {
    with_pixel_type!(f, P => decode_rgba_kernel::<P>(s, d));
}
#[cfg(target_arch = "x86_64")]
#[arcane]
fn decode_565_impl_v3(_t: X64V3Token, f: PixelFormat, s: &[u8], d: &mut [u16]) {
    with_pixel_type!(f, P => decode_565_kernel::<P>(s, d));
}
#[cfg(target_arch = "x86_64")]
#[arcane]
fn composite_565_impl_v3(_t: X64V3Token, f: PixelFormat, s: &[u8], d: &mut [u16]) {
    with_pixel_type!(f, P => composite_565_kernel::<P>(s, d));
}
#[cfg(target_arch = "x86_64")]
#[arcane]
fn blend_565_impl_v3(_t: X64V3Token, fg: Prepared565, d: &mut [u16], a: u8) {
    blend_565_kernel(fg, d, a);
}
#[cfg(target_arch = "x86_64")]
#[arcane]
fn blend_888_impl_v3(_t: X64V3Token, fg: Prepared888, d: &mut [u32], a: u8) {
    blend_888_kernel(fg, d, a);
}
#[cfg(target_arch = "x86_64")]
#[arcane]
fn encode_impl_v3(_t: X64V3Token, f: PixelFormat, s: &[Rgba<u8>], d: &mut [u8]) {
    with_pixel_type!(f, P => encode_kernel::<P>(s, d));
}

// ===========================================================================
// ARM arcane wrappers
// ===========================================================================
#[cfg(target_arch = "aarch64")]
#[arcane]
fn decode_8888_impl_arm_v2(_t: Arm64V2Token, f: PixelFormat, s: &[u8], d: &mut [u32]) {
    with_pixel_type!(f, P => decode_8888_kernel::<P>(s, d));
}
#[cfg(target_arch = "aarch64")]
#[arcane]
fn decode_rgba_impl_arm_v2(_t: Arm64V2Token, f: PixelFormat, s: &[u8], d: &mut [Rgba<u8>]) {
    with_pixel_type!(f, P => decode_rgba_kernel::<P>(s, d));
}
#[cfg(target_arch = "aarch64")]
#[arcane]
fn decode_565_impl_arm_v2(_t: Arm64V2Token, f: PixelFormat, s: &[u8], d: &mut [u16]) {
    with_pixel_type!(f, P => decode_565_kernel::<P>(s, d));
}
#[cfg(target_arch = "aarch64")]
#[arcane]
fn composite_565_impl_arm_v2(_t: Arm64V2Token, f: PixelFormat, s: &[u8], d: &mut [u16]) {
    with_pixel_type!(f, P => composite_565_kernel::<P>(s, d));
}
#[cfg(target_arch = "aarch64")]
#[arcane]
fn blend_565_impl_arm_v2(_t: Arm64V2Token, fg: Prepared565, d: &mut [u16], a: u8) {
    blend_565_kernel(fg, d, a);
}
#[cfg(target_arch = "aarch64")]
#[arcane]
fn blend_888_impl_arm_v2(_t: Arm64V2Token, fg: Prepared888, d: &mut [u32], a: u8) {
    blend_888_kernel(fg, d, a);
}
#[cfg(target_arch = "aarch64")]
#[arcane]
fn encode_impl_arm_v2(_t: Arm64V2Token, f: PixelFormat, s: &[Rgba<u8>], d: &mut [u8]) {
    with_pixel_type!(f, P => encode_kernel::<P>(s, d));
}

// ===========================================================================
// WASM arcane wrappers
// ===========================================================================
#[cfg(target_arch = "wasm32")]
#[arcane]
fn decode_8888_impl_wasm128(_t: Wasm128Token, f: PixelFormat, s: &[u8], d: &mut [u32]) {
    with_pixel_type!(f, P => decode_8888_kernel::<P>(s, d));
}
#[cfg(target_arch = "wasm32")]
#[arcane]
fn decode_rgba_impl_wasm128(_t: Wasm128Token, f: PixelFormat, s: &[u8], d: &mut [Rgba<u8>]) {
    with_pixel_type!(f, P => decode_rgba_kernel::<P>(s, d));
}
#[cfg(target_arch = "wasm32")]
#[arcane]
fn decode_565_impl_wasm128(_t: Wasm128Token, f: PixelFormat, s: &[u8], d: &mut [u16]) {
    with_pixel_type!(f, P => decode_565_kernel::<P>(s, d));
}
#[cfg(target_arch = "wasm32")]
#[arcane]
fn composite_565_impl_wasm128(_t: Wasm128Token, f: PixelFormat, s: &[u8], d: &mut [u16]) {
    with_pixel_type!(f, P => composite_565_kernel::<P>(s, d));
}
#[cfg(target_arch = "wasm32")]
#[arcane]
fn blend_565_impl_wasm128(_t: Wasm128Token, fg: Prepared565, d: &mut [u16], a: u8) {
    blend_565_kernel(fg, d, a);
}
#[cfg(target_arch = "wasm32")]
#[arcane]
fn blend_888_impl_wasm128(_t: Wasm128Token, fg: Prepared888, d: &mut [u32], a: u8) {
    blend_888_kernel(fg, d, a);
}
#[cfg(target_arch = "wasm32")]
#[arcane]
fn encode_impl_wasm128(_t: Wasm128Token, f: PixelFormat, s: &[Rgba<u8>], d: &mut [u8]) {
    with_pixel_type!(f, P => encode_kernel::<P>(s, d));
}

// ===========================================================================
// Public API: decode
// ===========================================================================

/// Decode a row into packed ARGB8888. Formats without alpha come out opaque.
pub fn decode_row_8888(format: PixelFormat, src: &[u8], dst: &mut [u32]) -> Result<(), SizeError> {
    let n = decode_count(format, src.len(), dst.len())?;
    let dst = &mut dst[..n];
    incant!(decode_8888_impl(format, src, dst), [v3, arm_v2, wasm128, scalar]);
    Ok(())
}

/// Decode a row into 8-bit components.
///
/// Formats without alpha leave each destination `a` as it was, so fill
/// `dst` with the opacity you want first.
pub fn decode_row_rgba(
    format: PixelFormat,
    src: &[u8],
    dst: &mut [Rgba<u8>],
) -> Result<(), SizeError> {
    let n = decode_count(format, src.len(), dst.len())?;
    let dst = &mut dst[..n];
    incant!(decode_rgba_impl(format, src, dst), [v3, arm_v2, wasm128, scalar]);
    Ok(())
}

/// [`decode_row_rgba`] into raw `R, G, B, A` bytes.
pub fn decode_row_rgba_bytes(
    format: PixelFormat,
    src: &[u8],
    dst: &mut [u8],
) -> Result<(), SizeError> {
    let dst: &mut [Rgba<u8>] =
        bytemuck::try_cast_slice_mut(dst).map_err(|_| SizeError::NotPixelAligned)?;
    decode_row_rgba(format, src, dst)
}

/// Decode a row into RGB565, discarding alpha.
pub fn decode_row_565(format: PixelFormat, src: &[u8], dst: &mut [u16]) -> Result<(), SizeError> {
    let n = decode_count(format, src.len(), dst.len())?;
    let dst = &mut dst[..n];
    incant!(decode_565_impl(format, src, dst), [v3, arm_v2, wasm128, scalar]);
    Ok(())
}

// ===========================================================================
// Public API: blend
// ===========================================================================

/// Draw a stored row over an RGB565 row, using the row's own alpha.
///
/// Formats without alpha overwrite the destination.
pub fn composite_row_565(
    format: PixelFormat,
    src: &[u8],
    dst: &mut [u16],
) -> Result<(), SizeError> {
    let n = decode_count(format, src.len(), dst.len())?;
    let dst = &mut dst[..n];
    incant!(composite_565_impl(format, src, dst), [v3, arm_v2, wasm128, scalar]);
    Ok(())
}

/// Blend one prepared color over every pixel of `dst` with 5-bit alpha.
pub fn blend_row_565(fg: Prepared565, dst: &mut [u16], alpha: u8) -> Result<(), SizeError> {
    check_inplace(dst.len())?;
    debug_assert!(alpha <= 31, "5-bit alpha out of range: {alpha}");
    incant!(blend_565_impl(fg, dst, alpha), [v3, arm_v2, wasm128, scalar]);
    Ok(())
}

/// Blend one prepared color over every pixel of `dst` with 8-bit alpha.
pub fn blend_row_888(fg: Prepared888, dst: &mut [u32], alpha: u8) -> Result<(), SizeError> {
    check_inplace(dst.len())?;
    incant!(blend_888_impl(fg, dst, alpha), [v3, arm_v2, wasm128, scalar]);
    Ok(())
}

// ===========================================================================
// Public API: encode
// ===========================================================================

/// Encode a row of components into `format`.
///
/// `dst` needs [`PixelFormat::row_bytes`] bytes for `src.len()` pixels. Bytes
/// past the encoded pixels are left alone, as are the padding bits of a
/// partial final Mono byte.
pub fn encode_row(format: PixelFormat, src: &[Rgba<u8>], dst: &mut [u8]) -> Result<(), SizeError> {
    check_format(format)?;
    check_inplace(src.len())?;
    let needed = format
        .checked_row_bytes(src.len())
        .ok_or(SizeError::PixelCountMismatch)?;
    if dst.len() < needed {
        return Err(SizeError::PixelCountMismatch);
    }
    incant!(encode_impl(format, src, dst), [v3, arm_v2, wasm128, scalar]);
    Ok(())
}

/// [`encode_row`] from raw `R, G, B, A` bytes.
pub fn encode_row_rgba_bytes(
    format: PixelFormat,
    src: &[u8],
    dst: &mut [u8],
) -> Result<(), SizeError> {
    let src: &[Rgba<u8>] = bytemuck::try_cast_slice(src).map_err(|_| SizeError::NotPixelAligned)?;
    encode_row(format, src, dst)
}
