use crate::foundation::core::{Point, Rect, Size, Vec2};
use crate::session::model::{LogoTransform, MAX_LOGO_SCALE, MIN_LOGO_SCALE, normalize_logo_scale};

/// Gap kept between the logo and the bottom-right raster edges.
pub const EDGE_MARGIN: f64 = 10.0;
/// Increment used by the +/- scale buttons.
pub const SCALE_STEP: f64 = 0.2;

/// Bottom-right placement with [`EDGE_MARGIN`], clamped so the logo stays inside `dest`.
pub fn default_position(dest: Size, logo: Size) -> Point {
    let p = Point::new(
        dest.width - logo.width - EDGE_MARGIN,
        dest.height - logo.height - EDGE_MARGIN,
    );
    clamp_position(p, dest, logo)
}

/// Clamp each axis into `[0, dest - logo]`; a logo larger than `dest` pins to `0`.
pub fn clamp_position(pos: Point, dest: Size, logo: Size) -> Point {
    let max_x = (dest.width - logo.width).max(0.0);
    let max_y = (dest.height - logo.height).max(0.0);
    Point::new(pos.x.clamp(0.0, max_x), pos.y.clamp(0.0, max_y))
}

/// Inclusive point-in-rect test used to start a drag.
pub fn hit_test(pointer: Point, logo: Rect) -> bool {
    pointer.x >= logo.x0 && pointer.x <= logo.x1 && pointer.y >= logo.y0 && pointer.y <= logo.y1
}

/// Transient state of an in-progress drag.
///
/// Lives beside the committed transform; nothing is written back until pointer-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Pointer position minus logo origin at pointer-down.
    pub offset: Vec2,
    /// Live logo origin.
    pub position: Point,
}

/// Logo position/scale state machine: idle, or dragging with a [`DragSession`].
#[derive(Clone, Debug, Default)]
pub struct WatermarkPlacer {
    committed: LogoTransform,
    drag: Option<DragSession>,
    custom: bool,
}

impl WatermarkPlacer {
    /// Start from a stored transform. `custom` marks a position the user chose (or one that was
    /// restored), which effect changes must not overwrite.
    pub fn new(transform: LogoTransform, custom: bool) -> Self {
        Self {
            committed: LogoTransform {
                position: transform.position,
                scale: normalize_logo_scale(transform.scale),
            },
            drag: None,
            custom,
        }
    }

    /// Committed transform.
    pub fn transform(&self) -> LogoTransform {
        self.committed
    }

    /// Position to draw right now: the live drag position while dragging.
    pub fn live_position(&self) -> Point {
        self.drag
            .map(|d| d.position)
            .unwrap_or(self.committed.position)
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether the committed position came from the user rather than [`default_position`].
    pub fn has_custom_position(&self) -> bool {
        self.custom
    }

    /// Move to the default bottom-right placement and forget any custom position.
    ///
    /// Returns the new position.
    pub fn reset_to_default(&mut self, dest: Size, logo: Size) -> Point {
        self.drag = None;
        self.custom = false;
        self.committed.position = default_position(dest, logo);
        self.committed.position
    }

    /// Begin a drag if `pointer` is on the logo.
    pub fn pointer_down(&mut self, pointer: Point, logo: Rect) -> bool {
        if !hit_test(pointer, logo) {
            return false;
        }
        let origin = self.committed.position;
        self.drag = Some(DragSession {
            offset: pointer - origin,
            position: origin,
        });
        true
    }

    /// Follow the pointer during a drag. Returns the new live position, or `None` when idle.
    pub fn pointer_move(&mut self, pointer: Point, dest: Size, logo: Size) -> Option<Point> {
        let drag = self.drag.as_mut()?;
        drag.position = clamp_position(pointer - drag.offset, dest, logo);
        Some(drag.position)
    }

    /// Finish the drag and commit its position. Returns the committed transform, or `None`
    /// when no drag was active.
    pub fn pointer_up(&mut self) -> Option<LogoTransform> {
        let drag = self.drag.take()?;
        self.committed.position = drag.position;
        self.custom = true;
        Some(self.committed)
    }

    /// Commit an explicit position (already in raster space), clamped like a drag. Cancels any
    /// drag in progress.
    pub fn set_position(&mut self, pos: Point, dest: Size, logo: Size) -> Point {
        self.drag = None;
        self.custom = true;
        self.committed.position = clamp_position(pos, dest, logo);
        self.committed.position
    }

    /// Pull the committed position back inside `dest` after the raster or logo size changed.
    ///
    /// Keeps the custom flag. Returns the new position only when it moved.
    pub fn clamp_into(&mut self, dest: Size, logo: Size) -> Option<Point> {
        let clamped = clamp_position(self.committed.position, dest, logo);
        if clamped == self.committed.position {
            return None;
        }
        self.committed.position = clamped;
        Some(clamped)
    }

    /// Set the scale, rounded to one decimal and clamped into `[0.2, 3.0]`.
    pub fn set_scale(&mut self, scale: f64) -> f64 {
        self.committed.scale = normalize_logo_scale(scale);
        self.committed.scale
    }

    /// Step the scale by [`SCALE_STEP`] up or down.
    pub fn step_scale(&mut self, up: bool) -> f64 {
        let next = if up {
            (self.committed.scale + SCALE_STEP).min(MAX_LOGO_SCALE)
        } else {
            (self.committed.scale - SCALE_STEP).max(MIN_LOGO_SCALE)
        };
        self.set_scale(next)
    }

    /// Scale as a percentage label, e.g. `"120%"`.
    pub fn scale_label(&self) -> String {
        format!("{}%", (self.committed.scale * 100.0).round() as i64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/watermark/placer.rs"]
mod tests;
