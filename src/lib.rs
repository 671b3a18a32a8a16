//! # swatch
//!
//! *Pick the right colour card for every asset.*
//!
//! Compact pixel formats for memory-starved tile renderers: store each sprite
//! in whatever packing suits it (RGB565, ARGB4444, ARGB6666, ARGB8565, RGB888,
//! ARGB8888, 8-bit gray or 1-bit mono) and composite everything through two
//! fast working formats, RGB565 and RGB888.
//!
//! ## Per-pixel core (always available)
//!
//! - [`PixelFormat`]: the closed set of storage formats, with
//!   [`has_alpha`](PixelFormat::has_alpha) and
//!   [`byte_width`](PixelFormat::byte_width).
//! - [`access`]: resolve a format to a decode function *once*, then call it
//!   per pixel without branching on the format again.
//! - [`decode`] / [`encode`]: the per-format pixel readers and writers behind
//!   those tables.
//! - [`convert`] / [`hsv`]: explicit format-to-format converters.
//! - [`blend`]: packed-integer alpha blending for 565 and 888, including
//!   prepared foregrounds for sprite fills.
//!
//! Nothing here allocates or validates. Preconditions such as the alpha range
//! or the mono bit index are checked with `debug_assert!` only.
//!
//! ## Row and surface layer
//!
//! [`rows`] validates whole rows up front and runs the per-pixel kernels under
//! a single SIMD dispatch. [`Bitmap`] and [`Tilemap`] are borrowed views over
//! asset data.
//!
//! ```rust
//! use swatch::{PixelFormat, access, blend};
//!
//! // ARGB4444: alpha 0xF, red 0xF, green 0x0, blue 0x0
//! let px = [0xFF, 0x00];
//! let read = access::accessor_5565(PixelFormat::Argb4444).unwrap();
//! let mut sample = swatch::Sample565::opaque5();
//! read(&px, 0, &mut sample);
//! assert_eq!(sample.color, 0xF800);
//!
//! let out = blend::blend_5565(sample.color, 0x001F, sample.alpha);
//! assert_eq!(out, 0xF800);
//! ```
//!
//! ## Feature flags
//!
//! - **`std`** (default): links `std` and enables runtime CPU feature
//!   detection in `archmage`. Without it nothing links `std`.
//! - **`imgref`**: whole-image decoding and encoding with `imgref` buffers
//!   (the `img` module). Allocates.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

use core::fmt;

pub mod access;
pub mod blend;
pub mod color;
pub mod convert;
pub mod decode;
pub mod encode;
mod format;
pub mod hsv;
pub mod rows;
mod surface;

#[cfg(feature = "imgref")]
pub mod img;

pub use color::Sample565;
pub use format::{ParseFormatError, PixelFormat};
pub use surface::{Bitmap, PixelRef, Tilemap};

/// Buffer size or format errors reported by the row and surface layer.
///
/// The per-pixel core never returns errors; this type only appears where whole
/// slices are validated before a loop starts.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeError {
    /// Input is empty or not a whole number of pixels.
    NotPixelAligned,
    /// Destination holds fewer pixels than the source provides.
    PixelCountMismatch,
    /// Dimensions, stride or total length do not describe the buffer.
    InvalidStride,
    /// The format has no decoder or encoder (Indexed, Unknown).
    Unsupported(PixelFormat),
}

impl fmt::Display for SizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPixelAligned => f.write_str("buffer is empty or not a whole number of pixels"),
            Self::PixelCountMismatch => {
                f.write_str("destination is smaller than the source pixel count")
            }
            Self::InvalidStride => f.write_str("dimensions or stride do not fit the buffer"),
            Self::Unsupported(format) => write!(f, "no pixel accessor for {format}"),
        }
    }
}

impl core::error::Error for SizeError {}
