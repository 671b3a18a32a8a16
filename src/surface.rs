//! Borrowed views over stored bitmaps and tile sheets.
//!
//! Neither type owns or copies pixel data. Rows are tightly packed and
//! byte aligned: a row of `width` pixels takes
//! [`PixelFormat::row_bytes`]`(width)` bytes, so each Mono row starts on a
//! fresh byte.

use crate::{PixelFormat, SizeError};

/// Where one pixel lives: the bytes starting at it and, for Mono, which bit
/// of the first byte. Hand both straight to a decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRef<'a> {
    pub bytes: &'a [u8],
    pub bit: u8,
}

impl PixelRef<'_> {
    /// The stored value as an integer, most significant byte first. Mono
    /// yields 0 or 1.
    ///
    /// This is the value a bitmap's transparent color is compared against.
    pub fn raw(&self, format: PixelFormat) -> u32 {
        match format {
            PixelFormat::Mono => u32::from((self.bytes[0] >> (7 - (self.bit & 7))) & 1),
            other => self.bytes[..other.byte_width()]
                .iter()
                .fold(0, |acc, &b| (acc << 8) | u32::from(b)),
        }
    }
}

/// A stored image: format, chroma key, dimensions and borrowed data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap<'a> {
    format: PixelFormat,
    transparent: Option<u32>,
    width: usize,
    height: usize,
    data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    /// Wrap `data` as a `width` × `height` image.
    ///
    /// The transparent color defaults to
    /// [`PixelFormat::transparent_color`]. Extra trailing bytes are allowed.
    /// Indexed bitmaps can be described but not decoded.
    pub fn new(
        format: PixelFormat,
        width: usize,
        height: usize,
        data: &'a [u8],
    ) -> Result<Self, SizeError> {
        if format == PixelFormat::Unknown {
            return Err(SizeError::Unsupported(format));
        }
        if width == 0 || height == 0 {
            return Err(SizeError::InvalidStride);
        }
        let total = format
            .checked_row_bytes(width)
            .and_then(|rb| rb.checked_mul(height))
            .ok_or(SizeError::InvalidStride)?;
        if data.len() < total {
            return Err(SizeError::InvalidStride);
        }
        Ok(Self {
            format,
            transparent: format.transparent_color(),
            width,
            height,
            data,
        })
    }

    /// Replace the chroma key. Only meaningful for formats without alpha.
    #[must_use]
    pub fn with_transparent_color(mut self, color: u32) -> Self {
        self.transparent = Some(color);
        self
    }

    #[must_use]
    pub fn without_transparent_color(mut self) -> Self {
        self.transparent = None;
        self
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn transparent_color(&self) -> Option<u32> {
        self.transparent
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The image bytes, without any trailing bytes passed to [`new`](Self::new).
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        &self.data[..self.row_bytes() * self.height]
    }

    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.format.row_bytes(self.width)
    }

    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let rb = self.row_bytes();
        Some(&self.data[y * rb..][..rb])
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &'a [u8]> + use<'a> {
        self.data().chunks_exact(self.row_bytes())
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<PixelRef<'a>> {
        if x >= self.width {
            return None;
        }
        let row = self.row(y)?;
        Some(match self.format {
            PixelFormat::Mono => PixelRef {
                bytes: &row[x / 8..],
                bit: (x % 8) as u8,
            },
            format => PixelRef {
                bytes: &row[x * format.byte_width()..],
                bit: 0,
            },
        })
    }

    /// Whether `px` matches the chroma key. Always false without a key, and
    /// for formats with alpha, which carry their own transparency.
    pub fn is_keyed(&self, px: PixelRef<'_>) -> bool {
        !self.format.has_alpha() && Some(px.raw(self.format)) == self.transparent
    }
}

/// A sheet of equally sized tiles stored back to back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tilemap<'a> {
    format: PixelFormat,
    transparent: Option<u32>,
    tile_width: usize,
    tile_height: usize,
    tile_count: usize,
    tile_stride: usize,
    data: &'a [u8],
}

impl<'a> Tilemap<'a> {
    /// Wrap `data` as `tile_count` tiles, each `tile_stride` bytes apart.
    ///
    /// `tile_stride` must cover a whole tile; larger strides leave padding
    /// between tiles that is never read.
    pub fn new(
        format: PixelFormat,
        tile_width: usize,
        tile_height: usize,
        tile_count: usize,
        tile_stride: usize,
        data: &'a [u8],
    ) -> Result<Self, SizeError> {
        if format == PixelFormat::Unknown {
            return Err(SizeError::Unsupported(format));
        }
        if tile_width == 0 || tile_height == 0 || tile_count == 0 {
            return Err(SizeError::InvalidStride);
        }
        let tile_bytes = format
            .checked_row_bytes(tile_width)
            .and_then(|rb| rb.checked_mul(tile_height))
            .ok_or(SizeError::InvalidStride)?;
        if tile_bytes > tile_stride {
            return Err(SizeError::InvalidStride);
        }
        let total = (tile_count - 1)
            .checked_mul(tile_stride)
            .ok_or(SizeError::InvalidStride)?
            .checked_add(tile_bytes)
            .ok_or(SizeError::InvalidStride)?;
        if data.len() < total {
            return Err(SizeError::InvalidStride);
        }
        Ok(Self {
            format,
            transparent: format.transparent_color(),
            tile_width,
            tile_height,
            tile_count,
            tile_stride,
            data,
        })
    }

    /// Tightly packed tiles: stride equals one tile's size.
    pub fn packed(
        format: PixelFormat,
        tile_width: usize,
        tile_height: usize,
        tile_count: usize,
        data: &'a [u8],
    ) -> Result<Self, SizeError> {
        let stride = format
            .checked_row_bytes(tile_width)
            .and_then(|rb| rb.checked_mul(tile_height))
            .ok_or(SizeError::InvalidStride)?;
        Self::new(format, tile_width, tile_height, tile_count, stride, data)
    }

    #[must_use]
    pub fn with_transparent_color(mut self, color: u32) -> Self {
        self.transparent = Some(color);
        self
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn transparent_color(&self) -> Option<u32> {
        self.transparent
    }

    pub fn tile_width(&self) -> usize {
        self.tile_width
    }

    pub fn tile_height(&self) -> usize {
        self.tile_height
    }

    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    pub fn tile_stride(&self) -> usize {
        self.tile_stride
    }

    /// Tile `index` as a bitmap sharing this map's data, or `None` past the end.
    pub fn tile(&self, index: usize) -> Option<Bitmap<'a>> {
        if index >= self.tile_count {
            return None;
        }
        Some(Bitmap {
            format: self.format,
            transparent: self.transparent,
            width: self.tile_width,
            height: self.tile_height,
            data: &self.data[index * self.tile_stride..],
        })
    }

    pub fn tiles(&self) -> impl ExactSizeIterator<Item = Bitmap<'a>> + use<'a> {
        let map = *self;
        (0..self.tile_count).map(move |i| Bitmap {
            format: map.format,
            transparent: map.transparent,
            width: map.tile_width,
            height: map.tile_height,
            data: &map.data[i * map.tile_stride..],
        })
    }
}
