pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Map a `[0,1]` factor onto `0..=255`.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    ((v.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u8
}

/// Round to one decimal place, half away from zero.
pub(crate) fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Round a non-negative layout length to whole pixels, never below one.
pub(crate) fn round_px(v: f64) -> u32 {
    if !v.is_finite() || v <= 1.0 {
        return 1;
    }
    v.round().min(f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
