use image::{RgbaImage, imageops};

use crate::effects::{composite::overlay_in_place, tint::apply_tint};
use crate::foundation::{
    core::{PixelSize, Size},
    error::{AppError, AppResult},
    math::round_px,
};
use crate::plan::crop::{CropPlan, plan_crop};
use crate::session::model::Session;
use crate::watermark::placer::clamp_position;

/// A rendered frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Raster {
    /// Frame dimensions.
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Borrow the pixels as an `image` buffer.
    pub fn to_image(&self) -> AppResult<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            AppError::validation(format!(
                "raster data length {} does not match {}x{}",
                self.data.len(),
                self.width,
                self.height
            ))
        })
    }

    fn from_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// Tunables for [`Compositor`].
#[derive(Clone, Copy, Debug)]
pub struct CompositorOpts {
    /// Opacity of the logo overlay.
    pub logo_opacity: f32,
    /// Base logo width as a fraction of the destination width.
    pub logo_width_fraction: f64,
    /// Upper bound on the base logo width, in pixels.
    pub logo_max_width: f64,
    /// Resampling filter for both the source crop and the logo.
    pub filter: imageops::FilterType,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            logo_opacity: 0.7,
            logo_width_fraction: 0.2,
            logo_max_width: 150.0,
            filter: imageops::FilterType::Triangle,
        }
    }
}

/// Geometry of one render pass, shared with the editor for placement and hit-testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderLayout {
    /// Crop and destination size.
    pub plan: CropPlan,
    /// Rendered logo size, when a logo is set.
    pub logo_size: Option<Size>,
}

/// Draws a [`Session`] into a fresh [`Raster`]: crop and scale, tint, then logo overlay.
///
/// Every call starts from the original source pixels; nothing is cached between calls.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    opts: CompositorOpts,
}

impl Compositor {
    /// Create a compositor.
    pub fn new(opts: CompositorOpts) -> Self {
        Self { opts }
    }

    /// Rendered logo size: `min(dest_w * 0.2, 150) * scale` wide, native aspect preserved.
    pub fn logo_size(&self, dest: PixelSize, logo: PixelSize, scale: f64) -> Size {
        let base = (f64::from(dest.width) * self.opts.logo_width_fraction)
            .min(self.opts.logo_max_width);
        let width = base * scale;
        let height = if logo.width == 0 {
            0.0
        } else {
            width * f64::from(logo.height) / f64::from(logo.width)
        };
        Size::new(width, height)
    }

    /// Compute the render geometry, or `None` when there is no source image.
    pub fn layout(&self, session: &Session) -> Option<RenderLayout> {
        let source = session.source.as_ref()?;
        let fx = &session.effects;
        let plan = plan_crop(source.size(), fx.aspect_ratio(), fx.resolution_scale());
        let logo_size = session
            .logo
            .as_ref()
            .map(|logo| self.logo_size(plan.dest_size, logo.size(), session.logo_transform.scale));
        Some(RenderLayout { plan, logo_size })
    }

    /// Render `session` into a new raster.
    #[tracing::instrument(skip_all)]
    pub fn render(&self, session: &Session) -> AppResult<Raster> {
        let source = session
            .source
            .as_ref()
            .ok_or_else(|| AppError::validation("no source image to render"))?;
        let layout = self
            .layout(session)
            .ok_or_else(|| AppError::validation("no source image to render"))?;
        let plan = layout.plan;
        if plan.is_empty() {
            return Err(AppError::validation("render target has zero area"));
        }

        let dest = plan.dest_size;
        let crop = plan.source_pixels(source.size());
        let cropped =
            imageops::crop_imm(source.pixels(), crop.x, crop.y, crop.width, crop.height)
                .to_image();
        let mut canvas = if crop.size() == dest {
            cropped
        } else {
            imageops::resize(&cropped, dest.width, dest.height, self.opts.filter)
        };

        let intensity = session.effects.filter_intensity();
        if intensity > 0.0 {
            apply_tint(&mut canvas, intensity);
        }

        if let (Some(logo), Some(size)) = (session.logo.as_ref(), layout.logo_size) {
            let lw = round_px(size.width);
            let lh = round_px(size.height);
            let pixels = logo.pixels();
            let scaled = if pixels.dimensions() == (lw, lh) {
                pixels.clone()
            } else {
                imageops::resize(pixels, lw, lh, self.opts.filter)
            };

            let pos = clamp_position(
                session.logo_transform.position,
                dest.to_size(),
                Size::new(f64::from(lw), f64::from(lh)),
            );
            overlay_in_place(
                &mut canvas,
                &scaled,
                pos.x.round() as i64,
                pos.y.round() as i64,
                self.opts.logo_opacity,
            );
        }

        tracing::debug!(
            width = dest.width,
            height = dest.height,
            intensity,
            logo = session.logo.is_some(),
            "rendered frame"
        );
        Ok(Raster::from_image(canvas))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
