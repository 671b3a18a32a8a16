//! HSV to RGB, for generated palettes and color cycling.
//!
//! Hue is in degrees and wraps, so -90 and 270 are the same color.
//! Saturation and value are clamped to `0.0..=1.0`. Channels are scaled to
//! the target precision and truncated, never rounded.

use rgb::Rgb;

use crate::color::{Color565, Color888, unit_clamp};

/// Normalised (r, g, b) in `0.0..=1.0`.
fn hsv_unit(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let s = unit_clamp(s);
    let v = unit_clamp(v);
    let mut h = h % 360.0;
    if h < 0.0 {
        h += 360.0;
    }
    // Tiny negative hues round up to exactly 360.0 above.
    if h >= 360.0 {
        h = 0.0;
    }
    let h = h / 60.0;
    let sector = (h as u8).min(5);
    let f = h - f32::from(sector);
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb<u8> {
    let (r, g, b) = hsv_unit(h, s, v);
    Rgb::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Channels are scaled straight to 5/6/5 bits rather than through 8 bits.
pub fn hsv_to_565(h: f32, s: f32, v: f32) -> Color565 {
    let (r, g, b) = hsv_unit(h, s, v);
    let r = u16::from((r * 31.0) as u8);
    let g = u16::from((g * 63.0) as u8);
    let b = u16::from((b * 31.0) as u8);
    (r << 11) | (g << 5) | b
}

pub fn hsv_to_888(h: f32, s: f32, v: f32) -> Color888 {
    let Rgb { r, g, b } = hsv_to_rgb(h, s, v);
    crate::convert::rgb_to_888(r, g, b)
}
