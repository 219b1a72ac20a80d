use std::fmt;

use crate::assets::decode::ImageAsset;
use crate::foundation::{core::Point, math::round_tenth};

/// Smallest logo scale factor.
pub const MIN_LOGO_SCALE: f64 = 0.2;
/// Largest logo scale factor.
pub const MAX_LOGO_SCALE: f64 = 3.0;
/// Smallest resolution scale accepted by [`EffectParams`].
pub const MIN_RESOLUTION_SCALE: f64 = 0.1;

const DEFAULT_FILTER_INTENSITY: f64 = 0.3;

/// Crop aspect ratio.
///
/// Serialized as its tag (`"original"`, `"16:9"`, ...). Tags that do not parse degrade to
/// [`AspectRatio::Original`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "String", from = "String")]
pub enum AspectRatio {
    /// Keep the full source frame.
    #[default]
    Original,
    /// Fixed `w:h` ratio, both sides non-zero.
    Ratio {
        /// Width term.
        w: u32,
        /// Height term.
        h: u32,
    },
}

impl AspectRatio {
    /// Ratios offered by the effects panel, in display order.
    pub const PRESETS: [AspectRatio; 6] = [
        AspectRatio::Original,
        AspectRatio::Ratio { w: 1, h: 1 },
        AspectRatio::Ratio { w: 4, h: 3 },
        AspectRatio::Ratio { w: 16, h: 9 },
        AspectRatio::Ratio { w: 9, h: 16 },
        AspectRatio::Ratio { w: 2, h: 3 },
    ];

    /// Parse a tag such as `"4:3"`. Malformed tags and zero terms yield `Original`.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("original") {
            return Self::Original;
        }
        let parsed = tag.split_once(':').and_then(|(a, b)| {
            let w = a.trim().parse::<u32>().ok()?;
            let h = b.trim().parse::<u32>().ok()?;
            (w > 0 && h > 0).then_some(Self::Ratio { w, h })
        });
        parsed.unwrap_or_else(|| {
            tracing::debug!(tag, "unparseable aspect ratio; using original");
            Self::Original
        })
    }

    /// Width over height, or `None` for the original frame.
    pub fn ratio(self) -> Option<f64> {
        match self {
            Self::Original => None,
            Self::Ratio { w, h } => Some(f64::from(w) / f64::from(h)),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("original"),
            Self::Ratio { w, h } => write!(f, "{w}:{h}"),
        }
    }
}

impl From<AspectRatio> for String {
    fn from(v: AspectRatio) -> Self {
        v.to_string()
    }
}

impl From<String> for AspectRatio {
    fn from(v: String) -> Self {
        Self::parse(&v)
    }
}

/// Filter, downscale and crop settings.
///
/// Intensity stays in `[0,1]` and resolution scale in `[0.1,1]` however the value is built,
/// including deserialization. The scale floor is [`MIN_RESOLUTION_SCALE`], the smallest value the
/// resolution slider offers, rather than anything just above zero.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", from = "EffectParamsRepr")]
pub struct EffectParams {
    filter_intensity: f64,
    resolution_scale: f64,
    aspect_ratio: AspectRatio,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EffectParamsRepr {
    filter_intensity: f64,
    resolution_scale: f64,
    aspect_ratio: AspectRatio,
}

impl Default for EffectParamsRepr {
    fn default() -> Self {
        let d = EffectParams::default();
        Self {
            filter_intensity: d.filter_intensity,
            resolution_scale: d.resolution_scale,
            aspect_ratio: d.aspect_ratio,
        }
    }
}

impl From<EffectParamsRepr> for EffectParams {
    fn from(r: EffectParamsRepr) -> Self {
        Self::new(r.filter_intensity, r.resolution_scale, r.aspect_ratio)
    }
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            filter_intensity: DEFAULT_FILTER_INTENSITY,
            resolution_scale: 1.0,
            aspect_ratio: AspectRatio::Original,
        }
    }
}

impl EffectParams {
    /// Build clamped parameters.
    pub fn new(filter_intensity: f64, resolution_scale: f64, aspect_ratio: AspectRatio) -> Self {
        Self::default()
            .with_filter_intensity(filter_intensity)
            .with_resolution_scale(resolution_scale)
            .with_aspect_ratio(aspect_ratio)
    }

    /// Tint intensity in `[0,1]`.
    pub fn filter_intensity(&self) -> f64 {
        self.filter_intensity
    }

    /// Downscale factor in `[0.1,1]`.
    pub fn resolution_scale(&self) -> f64 {
        self.resolution_scale
    }

    /// Crop aspect ratio.
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// Replace the intensity; non-finite values keep the current one.
    pub fn with_filter_intensity(mut self, v: f64) -> Self {
        if v.is_finite() {
            self.filter_intensity = v.clamp(0.0, 1.0);
        }
        self
    }

    /// Replace the resolution scale; non-finite values keep the current one.
    pub fn with_resolution_scale(mut self, v: f64) -> Self {
        if v.is_finite() {
            self.resolution_scale = v.clamp(MIN_RESOLUTION_SCALE, 1.0);
        }
        self
    }

    /// Replace the aspect ratio.
    pub fn with_aspect_ratio(mut self, v: AspectRatio) -> Self {
        self.aspect_ratio = v;
        self
    }
}

/// Round to one decimal and clamp into `[0.2, 3.0]`; non-finite input maps to `1.0`.
pub fn normalize_logo_scale(scale: f64) -> f64 {
    if !scale.is_finite() {
        return 1.0;
    }
    round_tenth(scale).clamp(MIN_LOGO_SCALE, MAX_LOGO_SCALE)
}

/// Watermark placement in destination-raster pixel space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogoTransform {
    /// Top-left corner of the logo.
    pub position: Point,
    /// Multiplier on the base logo width.
    pub scale: f64,
}

impl Default for LogoTransform {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            scale: 1.0,
        }
    }
}

/// Everything one editing pass needs to produce a frame.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// Photo being edited.
    pub source: Option<ImageAsset>,
    /// Watermark logo, if any.
    pub logo: Option<ImageAsset>,
    /// Filter, downscale and crop settings.
    pub effects: EffectParams,
    /// Logo position and scale.
    pub logo_transform: LogoTransform,
}

#[cfg(test)]
#[path = "../../tests/unit/session/model.rs"]
mod tests;
