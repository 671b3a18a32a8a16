//! Whole-image decoding and encoding with [`imgref`] buffers.
//!
//! These allocate; the rest of the crate never does. Rows go through the
//! dispatched [`rows`](crate::rows) functions one at a time.
//!
//! ```rust
//! use swatch::{Bitmap, PixelFormat, img};
//!
//! // 2x1 RGB565: fuchsia (the default key), then white
//! let data = [0xF8, 0x1F, 0xFF, 0xFF];
//! let bmp = Bitmap::new(PixelFormat::Rgb565, 2, 1, &data).unwrap();
//! let out = img::decode_bitmap(&bmp).unwrap();
//! assert_eq!(out.buf()[0].a, 0);
//! assert_eq!(out.buf()[1], rgb::Rgba::new(255, 255, 255, 255));
//! ```

use alloc::vec;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::Rgba;

use crate::{Bitmap, PixelFormat, SizeError, rows};

/// Decode a bitmap to 8-bit RGBA.
///
/// Formats without alpha come out opaque, except pixels matching the
/// bitmap's transparent color, which get alpha 0.
pub fn decode_bitmap(bmp: &Bitmap<'_>) -> Result<ImgVec<Rgba<u8>>, SizeError> {
    let (w, h) = (bmp.width(), bmp.height());
    let mut buf = vec![Rgba::new(0, 0, 0, 255); w * h];
    let keyed = !bmp.format().has_alpha() && bmp.transparent_color().is_some();
    for (y, (src, dst)) in bmp.rows().zip(buf.chunks_exact_mut(w)).enumerate() {
        rows::decode_row_rgba(bmp.format(), src, dst)?;
        if keyed {
            for (x, px) in dst.iter_mut().enumerate() {
                if bmp.pixel(x, y).is_some_and(|p| bmp.is_keyed(p)) {
                    px.a = 0;
                }
            }
        }
    }
    Ok(ImgVec::new(buf, w, h))
}

/// [`decode_bitmap`] as tightly packed `R, G, B, A` bytes.
pub fn decode_bitmap_rgba_bytes(bmp: &Bitmap<'_>) -> Result<Vec<u8>, SizeError> {
    Ok(bytemuck::allocation::cast_vec(decode_bitmap(bmp)?.into_buf()))
}

/// Decode a bitmap to RGB565, discarding alpha and the chroma key.
pub fn decode_bitmap_565(bmp: &Bitmap<'_>) -> Result<ImgVec<u16>, SizeError> {
    let (w, h) = (bmp.width(), bmp.height());
    let mut buf = vec![0u16; w * h];
    for (src, dst) in bmp.rows().zip(buf.chunks_exact_mut(w)) {
        rows::decode_row_565(bmp.format(), src, dst)?;
    }
    Ok(ImgVec::new(buf, w, h))
}

/// Encode an image into `format`, rows packed back to back the way
/// [`Bitmap::new`] expects them.
pub fn encode_img(format: PixelFormat, img: ImgRef<'_, Rgba<u8>>) -> Result<Vec<u8>, SizeError> {
    let row_bytes = format
        .checked_row_bytes(img.width())
        .ok_or(SizeError::InvalidStride)?;
    let total = row_bytes
        .checked_mul(img.height())
        .ok_or(SizeError::InvalidStride)?;
    let mut out = vec![0u8; total];
    for (src, dst) in img.rows().zip(out.chunks_exact_mut(row_bytes.max(1))) {
        rows::encode_row(format, src, dst)?;
    }
    Ok(out)
}
