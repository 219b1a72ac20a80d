use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn mime_validation_accepts_only_jpeg_png_webp() {
    assert_eq!(ImageKind::from_mime("image/jpeg").unwrap(), ImageKind::Jpeg);
    assert_eq!(ImageKind::from_mime("IMAGE/PNG").unwrap(), ImageKind::Png);
    assert_eq!(ImageKind::from_mime("image/webp").unwrap(), ImageKind::WebP);

    let err = ImageKind::from_mime("image/gif").unwrap_err();
    assert!(matches!(err, AppError::UnsupportedType(_)));
    assert!(ImageKind::from_mime("text/plain").is_err());
}

#[test]
fn decode_png_keeps_dimensions_and_pixels() {
    let bytes = png_bytes(3, 2, [10, 20, 30, 200]);
    let asset = decode_upload(&bytes, "image/png").unwrap();
    assert_eq!(asset.kind(), ImageKind::Png);
    assert_eq!(asset.size(), PixelSize::new(3, 2));
    assert_eq!(asset.pixels().get_pixel(2, 1).0, [10, 20, 30, 200]);
    assert_eq!(asset.bytes(), bytes.as_slice());
}

#[test]
fn decode_rejects_garbage_and_empty() {
    assert!(matches!(decode_image(&[]), Err(AppError::Decode(_))));
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn unsupported_declared_type_is_rejected_before_decoding() {
    let bytes = png_bytes(1, 1, [0, 0, 0, 255]);
    let err = decode_upload(&bytes, "image/bmp").unwrap_err();
    assert!(err.is_user_facing());
}

#[test]
fn data_uri_round_trip_preserves_pixels() {
    let bytes = png_bytes(4, 4, [1, 2, 3, 255]);
    let asset = decode_image(&bytes).unwrap();

    let uri = to_data_uri(&asset);
    assert!(uri.starts_with("data:image/png;base64,"));

    let back = from_data_uri(&uri).unwrap();
    assert_eq!(back.size(), asset.size());
    assert_eq!(back.pixels().as_raw(), asset.pixels().as_raw());
}

#[test]
fn malformed_data_uris_fail() {
    assert!(from_data_uri("image/png;base64,AAAA").is_err());
    assert!(from_data_uri("data:image/png;base64").is_err());
    assert!(from_data_uri("data:image/png,plain").is_err());
    assert!(from_data_uri("data:image/png;base64,***").is_err());
}

#[test]
fn asset_from_rgba_is_png_backed() {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([9, 9, 9, 9]));
    let asset = asset_from_rgba(img).unwrap();
    assert_eq!(asset.kind(), ImageKind::Png);
    let again = decode_image(asset.bytes()).unwrap();
    assert_eq!(again.size(), PixelSize::new(2, 2));
}
