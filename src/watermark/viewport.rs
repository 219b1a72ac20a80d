use crate::foundation::core::{Point, Size};

/// Fraction of the viewport height a preview may occupy.
pub const MAX_VIEWPORT_HEIGHT_FRACTION: f64 = 0.7;

/// Mapping between the on-screen preview and the destination raster.
///
/// The raster itself is never resized for display; only pointer coordinates are converted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    raster: Size,
    display: Size,
}

impl Viewport {
    /// Fit `raster` into `container_width` and 70% of `viewport_height`, preserving aspect and
    /// never enlarging.
    pub fn fit(raster: Size, container_width: f64, viewport_height: f64) -> Self {
        let mut display = raster;
        if container_width > 0.0 && display.width > container_width {
            let k = container_width / display.width;
            display = Size::new(container_width, display.height * k);
        }
        let max_h = viewport_height * MAX_VIEWPORT_HEIGHT_FRACTION;
        if max_h > 0.0 && display.height > max_h {
            let k = max_h / display.height;
            display = Size::new(display.width * k, max_h);
        }
        Self { raster, display }
    }

    /// On-screen size of the preview.
    pub fn display_size(&self) -> Size {
        self.display
    }

    /// Convert a pointer position relative to the preview's top-left into raster pixels.
    pub fn to_raster(&self, pointer: Point) -> Point {
        if self.display.width <= 0.0 || self.display.height <= 0.0 {
            return pointer;
        }
        Point::new(
            pointer.x * self.raster.width / self.display.width,
            pointer.y * self.raster.height / self.display.height,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/watermark/viewport.rs"]
mod tests;
