use crate::foundation::{
    core::{PixelRect, PixelSize, Rect},
    math::round_px,
};
use crate::session::model::AspectRatio;

/// Where to sample the source and how large the destination raster is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropPlan {
    /// Region of the source image to draw, in source pixels (may be fractional).
    pub source_rect: Rect,
    /// Destination raster size.
    pub dest_size: PixelSize,
}

impl CropPlan {
    /// `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.dest_size.is_empty() || self.source_rect.area() <= 0.0
    }

    /// Source rect snapped to whole pixels, kept inside a `bounds` sized image and at least
    /// one pixel on each axis.
    pub fn source_pixels(&self, bounds: PixelSize) -> PixelRect {
        if bounds.is_empty() {
            return PixelRect::default();
        }
        let r = self.source_rect;
        let x = (r.x0.round().max(0.0) as u32).min(bounds.width - 1);
        let y = (r.y0.round().max(0.0) as u32).min(bounds.height - 1);
        let width = round_px(r.width()).min(bounds.width - x);
        let height = round_px(r.height()).min(bounds.height - y);
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Plan the crop for `aspect` and the downscale for `resolution_scale`.
///
/// A ratio wider than the image keeps the full width and centers vertically; otherwise the
/// full height is kept and the crop is centered horizontally. The scale only shrinks: values
/// at or above `1` leave the crop at native size.
pub fn plan_crop(source: PixelSize, aspect: AspectRatio, resolution_scale: f64) -> CropPlan {
    if source.is_empty() {
        return CropPlan {
            source_rect: Rect::ZERO,
            dest_size: PixelSize::default(),
        };
    }

    let w = f64::from(source.width);
    let h = f64::from(source.height);
    let full = Rect::new(0.0, 0.0, w, h);

    let source_rect = match aspect.ratio() {
        None => full,
        Some(target) => {
            let image = w / h;
            if target > image {
                let crop_h = w / target;
                let y = (h - crop_h) / 2.0;
                Rect::new(0.0, y, w, y + crop_h)
            } else {
                let crop_w = h * target;
                let x = (w - crop_w) / 2.0;
                Rect::new(x, 0.0, x + crop_w, h)
            }
        }
    };

    let r = if resolution_scale.is_finite() && resolution_scale > 0.0 {
        resolution_scale
    } else {
        1.0
    };
    let (cw, ch) = (source_rect.width(), source_rect.height());
    let dest_size = if r < 1.0 {
        PixelSize::new(round_px(cw * r), round_px(ch * r))
    } else {
        PixelSize::new(round_px(cw), round_px(ch))
    };

    CropPlan {
        source_rect,
        dest_size,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/crop.rs"]
mod tests;
