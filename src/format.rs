use core::fmt;
use core::str::FromStr;

/// Storage layout of one pixel.
///
/// Discriminants are stable and double as indices into the accessor tables.
/// Multi-byte formats are stored most significant byte first, so alpha (when
/// present) is always byte 0.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// No known layout. Never decodable.
    #[default]
    Unknown = 0,
    /// `RRRRRGGG GGGBBBBB`
    Rgb565 = 1,
    /// `AAAARRRR GGGGBBBB`
    Argb4444 = 2,
    /// `AAAAAARR RRRRGGGG GGBBBBBB`
    Argb6666 = 3,
    /// `AAAAAAAA` followed by RGB565.
    Argb8565 = 4,
    /// `R`, `G`, `B` bytes.
    Rgb888 = 5,
    /// `A`, `R`, `G`, `B` bytes.
    Argb8888 = 6,
    /// One palette index per byte. No palette lookup is provided.
    Indexed = 7,
    /// One bit per pixel, most significant bit leftmost.
    Mono = 8,
    /// One intensity byte per pixel.
    Grayscale = 9,
}

impl PixelFormat {
    /// Every format, in discriminant order.
    pub const ALL: [PixelFormat; 10] = [
        Self::Unknown,
        Self::Rgb565,
        Self::Argb4444,
        Self::Argb6666,
        Self::Argb8565,
        Self::Rgb888,
        Self::Argb8888,
        Self::Indexed,
        Self::Mono,
        Self::Grayscale,
    ];

    /// Number of formats; the length of every accessor table.
    pub const COUNT: usize = Self::ALL.len();

    /// Whether the stored pixel carries its own alpha channel.
    ///
    /// Indexed, Mono and Unknown report `false`.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(
            self,
            Self::Argb4444 | Self::Argb6666 | Self::Argb8565 | Self::Argb8888
        )
    }

    /// Bytes occupied by one pixel.
    ///
    /// Mono returns 0 because its addressing unit is a bit: the byte holding
    /// pixel `i` is `i / 8` and its bit index is `i % 8`.
    #[inline]
    pub const fn byte_width(self) -> usize {
        match self {
            Self::Rgb565 | Self::Argb4444 => 2,
            Self::Argb6666 | Self::Argb8565 | Self::Rgb888 => 3,
            Self::Argb8888 => 4,
            Self::Grayscale | Self::Indexed => 1,
            Self::Mono | Self::Unknown => 0,
        }
    }

    /// Bits occupied by one pixel. Mono is 1; Unknown is 0.
    #[inline]
    pub const fn bits_per_pixel(self) -> usize {
        match self {
            Self::Mono => 1,
            other => other.byte_width() * 8,
        }
    }

    /// Bytes needed to store `pixels` pixels packed back to back.
    ///
    /// Saturates to `usize::MAX` when the bit count overflows, which no
    /// buffer can satisfy. Use [`checked_row_bytes`](Self::checked_row_bytes)
    /// to tell overflow apart.
    #[inline]
    pub const fn row_bytes(self, pixels: usize) -> usize {
        match self.checked_row_bytes(pixels) {
            Some(bytes) => bytes,
            None => usize::MAX,
        }
    }

    /// [`row_bytes`](Self::row_bytes), or `None` on overflow.
    #[inline]
    pub const fn checked_row_bytes(self, pixels: usize) -> Option<usize> {
        match pixels.checked_mul(self.bits_per_pixel()) {
            Some(bits) => Some(bits.div_ceil(8)),
            None => None,
        }
    }

    /// Default chroma key: fuchsia in the format's own encoding for RGB565
    /// and RGB888, none for everything else.
    pub const fn transparent_color(self) -> Option<u32> {
        match self {
            Self::Rgb565 => Some(crate::color::RGB565_TRANSPARENT as u32),
            Self::Rgb888 => Some(crate::color::RGB888_TRANSPARENT),
            _ => None,
        }
    }

    /// Canonical upper-case name, e.g. `"ARGB4444"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Rgb565 => "RGB565",
            Self::Argb4444 => "ARGB4444",
            Self::Argb6666 => "ARGB6666",
            Self::Argb8565 => "ARGB8565",
            Self::Rgb888 => "RGB888",
            Self::Argb8888 => "ARGB8888",
            Self::Indexed => "INDEXED",
            Self::Mono => "MONO",
            Self::Grayscale => "GRAYSCALE",
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A format name or discriminant that matches no [`PixelFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseFormatError;

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognised pixel format")
    }
}

impl core::error::Error for ParseFormatError {}

impl TryFrom<u8> for PixelFormat {
    type Error = ParseFormatError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ParseFormatError)
    }
}

impl FromStr for PixelFormat {
    type Err = ParseFormatError;

    /// Accepts long (`ARGB4444`, `RGB565`) and short (`4444`, `565`) names in
    /// any case, plus `MONO`, `GRAY`/`GRAYSCALE` and `INDEXED`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (alpha_prefix, bits) = match strip_prefix_ci(s, "ARGB") {
            Some(rest) => (Some(true), rest),
            None => match strip_prefix_ci(s, "RGB") {
                Some(rest) => (Some(false), rest),
                None => (None, s),
            },
        };
        let format = match bits {
            "565" => Self::Rgb565,
            "4444" => Self::Argb4444,
            "6666" => Self::Argb6666,
            "8565" => Self::Argb8565,
            "888" => Self::Rgb888,
            "8888" => Self::Argb8888,
            _ if s.eq_ignore_ascii_case("mono") => Self::Mono,
            _ if s.eq_ignore_ascii_case("gray") || s.eq_ignore_ascii_case("grayscale") => {
                Self::Grayscale
            }
            _ if s.eq_ignore_ascii_case("indexed") => Self::Indexed,
            _ => return Err(ParseFormatError),
        };
        // "ARGB565" and "RGB4444" name layouts that don't exist.
        match alpha_prefix {
            Some(alpha) if alpha != format.has_alpha() => Err(ParseFormatError),
            _ => Ok(format),
        }
    }
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_formats() {
        let with_alpha: alloc::vec::Vec<_> = PixelFormat::ALL
            .iter()
            .filter(|f| f.has_alpha())
            .copied()
            .collect();
        assert_eq!(
            with_alpha,
            [
                PixelFormat::Argb4444,
                PixelFormat::Argb6666,
                PixelFormat::Argb8565,
                PixelFormat::Argb8888
            ]
        );
    }

    #[test]
    fn byte_widths() {
        use PixelFormat::*;
        let widths: [(PixelFormat, usize); 10] = [
            (Unknown, 0),
            (Rgb565, 2),
            (Argb4444, 2),
            (Argb6666, 3),
            (Argb8565, 3),
            (Rgb888, 3),
            (Argb8888, 4),
            (Indexed, 1),
            (Mono, 0),
            (Grayscale, 1),
        ];
        for (format, width) in widths {
            assert_eq!(format.byte_width(), width, "{format}");
        }
        assert_eq!(Mono.bits_per_pixel(), 1);
        assert_eq!(Mono.row_bytes(9), 2);
        assert_eq!(Argb6666.row_bytes(5), 15);
    }

    #[test]
    fn row_bytes_saturates_on_overflow() {
        let huge = usize::MAX / 8;
        assert_eq!(PixelFormat::Argb8888.checked_row_bytes(huge), None);
        assert_eq!(PixelFormat::Argb8888.row_bytes(huge), usize::MAX);
        assert_eq!(PixelFormat::Mono.row_bytes(usize::MAX), usize::MAX.div_ceil(8));
        assert_eq!(PixelFormat::Unknown.row_bytes(usize::MAX), 0);
    }

    #[test]
    fn discriminants_round_trip() {
        for (i, format) in PixelFormat::ALL.iter().enumerate() {
            assert_eq!(format.index(), i);
            assert_eq!(PixelFormat::try_from(i as u8), Ok(*format));
        }
        assert_eq!(PixelFormat::try_from(10), Err(ParseFormatError));
    }

    #[test]
    fn parse_names() {
        assert_eq!("RGB565".parse(), Ok(PixelFormat::Rgb565));
        assert_eq!("565".parse(), Ok(PixelFormat::Rgb565));
        assert_eq!("argb4444".parse(), Ok(PixelFormat::Argb4444));
        assert_eq!("6666".parse(), Ok(PixelFormat::Argb6666));
        assert_eq!("ARGB8565".parse(), Ok(PixelFormat::Argb8565));
        assert_eq!("rgb888".parse(), Ok(PixelFormat::Rgb888));
        assert_eq!("8888".parse(), Ok(PixelFormat::Argb8888));
        assert_eq!("Gray".parse(), Ok(PixelFormat::Grayscale));
        assert_eq!("MONO".parse(), Ok(PixelFormat::Mono));
        assert_eq!("ARGB565".parse::<PixelFormat>(), Err(ParseFormatError));
        assert_eq!("RGB4444".parse::<PixelFormat>(), Err(ParseFormatError));
        assert_eq!("bgr".parse::<PixelFormat>(), Err(ParseFormatError));
        for format in PixelFormat::ALL.iter().filter(|f| **f != PixelFormat::Unknown) {
            assert_eq!(format.name().parse(), Ok(*format));
        }
    }

    #[test]
    fn transparent_keys() {
        assert_eq!(PixelFormat::Rgb565.transparent_color(), Some(0xF81F));
        assert_eq!(PixelFormat::Rgb888.transparent_color(), Some(0xFF00FF));
        assert_eq!(PixelFormat::Argb8888.transparent_color(), None);
        assert_eq!(PixelFormat::Mono.transparent_color(), None);
    }
}
