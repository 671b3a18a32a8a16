//! Validates the code examples from README.md compile and behave correctly.

#[test]
fn readme_core_api() {
    use swatch::{PixelFormat, Sample565, access, blend};

    let read = access::accessor_5565(PixelFormat::Argb4444).unwrap();
    let mut px = Sample565::opaque5();
    read(&[0x8F, 0x00], 0, &mut px);
    assert_eq!(px.color, 0xF800);
    assert_eq!(px.alpha, 17);

    let out = blend::blend_5565(px.color, 0x001F, px.alpha);
    assert_eq!(out, 0x800E);
}

#[test]
fn readme_prepared() {
    use swatch::blend;

    let fg = blend::prepare_888(0xFF0000);
    assert_eq!(blend::blend_prepared_888(fg, 0x0000FF, 128), 0x7F007F);
    assert_eq!(blend::blend_888(0xFF0000, 0x0000FF, 128), 0x7F007F);
}

#[test]
fn readme_rows() {
    use swatch::{PixelFormat, blend, rows};

    let sprite = [0xFF, 0x00, 0x00, 0x00];
    let mut line = [0x001Fu16; 2];
    rows::composite_row_565(PixelFormat::Argb4444, &sprite, &mut line).unwrap();
    assert_eq!(line, [0xF800, 0x001F]);

    let mut fill = [0u32; 8];
    rows::blend_row_888(blend::prepare_888(0xFFFFFF), &mut fill, 255).unwrap();
    assert!(fill.iter().all(|&p| p == 0xFFFFFF));
}

#[test]
fn readme_surfaces() {
    use swatch::{Bitmap, PixelFormat, Tilemap};

    let data = [0xF8, 0x1F, 0x00, 0x00];
    let bmp = Bitmap::new(PixelFormat::Rgb565, 2, 1, &data).unwrap();
    assert!(bmp.is_keyed(bmp.pixel(0, 0).unwrap()));
    assert!(!bmp.is_keyed(bmp.pixel(1, 0).unwrap()));

    let sheet = [0u8; 4 * 8 * 8];
    let tiles = Tilemap::packed(PixelFormat::Grayscale, 8, 8, 4, &sheet).unwrap();
    assert_eq!(tiles.tiles().len(), 4);
}

#[cfg(feature = "imgref")]
#[test]
fn readme_imgref() {
    use imgref::ImgVec;
    use rgb::Rgba;
    use swatch::{Bitmap, PixelFormat, img};

    let image = ImgVec::new(vec![Rgba::new(0xFC, 0x00, 0x80, 0xFF); 64 * 48], 64, 48);
    let bytes = img::encode_img(PixelFormat::Argb6666, image.as_ref()).unwrap();
    let bmp = Bitmap::new(PixelFormat::Argb6666, image.width(), image.height(), &bytes).unwrap();
    let decoded = img::decode_bitmap(&bmp).unwrap();
    assert_eq!(decoded.width(), 64);
    assert_eq!(decoded.height(), 48);
    // 0x80 keeps its top 6 bits (0b100000) and re-expands to 0x82.
    assert_eq!(decoded.buf()[0], Rgba::new(0xFF, 0x00, 0x82, 0xFF));
}
