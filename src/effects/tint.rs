const RED_GAIN: f32 = 0.7;
const GREEN_GAIN: f32 = 0.5;
const BLUE_CUT: f32 = 0.3;

/// Apply the warm "yellow" tint to straight-alpha RGBA8 pixels in place.
///
/// Red and green move toward 255, blue is pulled toward 0; alpha is untouched. Intensity is
/// clamped to `[0,1]` and `0` leaves the buffer unchanged. Applying twice compounds, so callers
/// must tint freshly drawn pixels exactly once.
pub fn apply_tint(rgba: &mut [u8], intensity: f64) {
    let i = if intensity.is_finite() {
        intensity.clamp(0.0, 1.0) as f32
    } else {
        0.0
    };
    if i <= 0.0 || rgba.len() < 4 {
        return;
    }

    let r_gain = i * RED_GAIN;
    let g_gain = i * GREEN_GAIN;
    let b_cut = i * BLUE_CUT;

    for px in rgba.chunks_exact_mut(4) {
        px[0] = lift(px[0], r_gain);
        px[1] = lift(px[1], g_gain);
        px[2] = cut(px[2], b_cut);
    }
}

fn lift(c: u8, gain: f32) -> u8 {
    let c = f32::from(c);
    (c + (255.0 - c) * gain).round().min(255.0) as u8
}

fn cut(c: u8, amount: f32) -> u8 {
    let c = f32::from(c);
    (c - c * amount).round().max(0.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/tint.rs"]
mod tests;
