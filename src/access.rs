//! Accessor dispatch: resolve a [`PixelFormat`] to a decode function once,
//! then call it per pixel.
//!
//! There are four tables, one per working representation. Each is a static
//! array indexed by the format's discriminant, so a lookup is a bounds-free
//! load and the returned function pointer never branches on format again.
//!
//! Indexed and Unknown have no entry in any table: lookups return `None` and
//! the caller has to route those assets through its own palette path.
//!
//! ```rust
//! use swatch::{PixelFormat, access};
//!
//! let row = [0x12u8, 0x34, 0x56, 0xFF, 0xFF, 0xFF];
//! let read = access::accessor_8888(PixelFormat::Rgb888).unwrap();
//! let bw = PixelFormat::Rgb888.byte_width();
//! let px: Vec<u32> = row.chunks_exact(bw).map(|p| read(p, 0)).collect();
//! assert_eq!(px, [0xFF12_3456, 0xFFFF_FFFF]);
//!
//! assert!(access::accessor_8888(PixelFormat::Indexed).is_none());
//! ```

use rgb::Rgba;

use crate::PixelFormat;
use crate::color::{Color8888, Sample565};
use crate::decode::{Argb4444, Argb6666, Argb8565, Argb8888, Decode, Gray8, Mono1, Rgb565, Rgb888};

/// Decoder into RGB565 plus alpha; the alpha precision is fixed by the table.
pub type Read565Fn = fn(px: &[u8], bit: u8, out: &mut Sample565);
/// Decoder into 8-bit components.
pub type ReadRgbaFn = fn(px: &[u8], bit: u8, out: &mut Rgba<u8>);
/// Decoder into packed ARGB8888.
pub type Read8888Fn = fn(px: &[u8], bit: u8) -> Color8888;

type Table<F> = [Option<F>; PixelFormat::COUNT];

macro_rules! table {
    ($ty:ty, $method:ident) => {
        [
            None,                                         // Unknown
            Some(<Rgb565 as Decode>::$method as $ty),     // Rgb565
            Some(<Argb4444 as Decode>::$method as $ty),   // Argb4444
            Some(<Argb6666 as Decode>::$method as $ty),   // Argb6666
            Some(<Argb8565 as Decode>::$method as $ty),   // Argb8565
            Some(<Rgb888 as Decode>::$method as $ty),     // Rgb888
            Some(<Argb8888 as Decode>::$method as $ty),   // Argb8888
            None,                                         // Indexed
            Some(<Mono1 as Decode>::$method as $ty),      // Mono
            Some(<Gray8 as Decode>::$method as $ty),      // Grayscale
        ]
    };
}

static ACCESS_5565: Table<Read565Fn> = table!(Read565Fn, to_5565);
static ACCESS_8565: Table<Read565Fn> = table!(Read565Fn, to_8565);
static ACCESS_RGBA: Table<ReadRgbaFn> = table!(ReadRgbaFn, to_rgba);
static ACCESS_8888: Table<Read8888Fn> = table!(Read8888Fn, to_8888);

/// Decoder to RGB565 with 5-bit alpha (0–31), for [`blend_5565`](crate::blend::blend_5565).
#[inline]
pub fn accessor_5565(format: PixelFormat) -> Option<Read565Fn> {
    ACCESS_5565[format.index()]
}

/// Decoder to RGB565 with 8-bit alpha (0–255).
#[inline]
pub fn accessor_8565(format: PixelFormat) -> Option<Read565Fn> {
    ACCESS_8565[format.index()]
}

/// Decoder to 8-bit components.
#[inline]
pub fn accessor_rgba(format: PixelFormat) -> Option<ReadRgbaFn> {
    ACCESS_RGBA[format.index()]
}

/// Decoder to packed ARGB8888.
#[inline]
pub fn accessor_8888(format: PixelFormat) -> Option<Read8888Fn> {
    ACCESS_8888[format.index()]
}
