use image::RgbaImage;

use crate::foundation::math::{mul_div255_u8, unit_to_u8};

/// One straight (non-premultiplied) RGBA8 pixel.
pub type StraightRgba8 = [u8; 4];

/// Source-over blend of straight-alpha pixels with an extra opacity factor.
pub fn over(dst: StraightRgba8, src: StraightRgba8, opacity: f32) -> StraightRgba8 {
    let op = unit_to_u8(opacity);
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let sa = mul_div255_u8(u16::from(src[3]), u16::from(op));
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);
    let da = mul_div255_u8(u16::from(dst[3]), inv);

    let out_a = u32::from(sa) + u32::from(da);
    let mut out = [0u8; 4];
    out[3] = out_a.min(255) as u8;
    for i in 0..3 {
        let num = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(da);
        out[i] = ((num + out_a / 2) / out_a).min(255) as u8;
    }
    out
}

/// Composite `src` onto `dst` with its top-left corner at `(x, y)`.
///
/// Pixels falling outside `dst` are skipped.
pub fn overlay_in_place(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64, opacity: f32) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        for dx in x0..x1 {
            let s = src.get_pixel((dx - x) as u32, (dy - y) as u32).0;
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            d.0 = over(d.0, s, opacity);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
