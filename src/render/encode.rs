use image::{
    ExtendedColorType, ImageEncoder,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
};

use crate::foundation::error::{AppError, AppResult};
use crate::render::compositor::Raster;

/// JPEG export quality (0-100).
pub const JPEG_QUALITY: u8 = 90;

const EXPORT_STEM: &str = "ai-said-so";

/// Export container format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// Lossless PNG with alpha.
    #[default]
    Png,
    /// JPEG at [`JPEG_QUALITY`]; alpha is flattened onto black.
    Jpeg,
}

impl ExportFormat {
    /// Parse `"png"`, `"jpg"` or `"jpeg"` (case-insensitive).
    pub fn from_name(name: &str) -> AppResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(AppError::validation(format!(
                "unknown export format '{other}'"
            ))),
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// MIME type of the encoded bytes.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Suggested download name, e.g. `ai-said-so.png`.
    pub fn file_name(self) -> String {
        format!("{EXPORT_STEM}.{}", self.extension())
    }
}

/// Encode a raster as PNG or JPEG bytes.
#[tracing::instrument(skip(raster), fields(width = raster.width, height = raster.height))]
pub fn encode(raster: &Raster, format: ExportFormat) -> AppResult<Vec<u8>> {
    if raster.size().is_empty() {
        return Err(AppError::encode("cannot encode an empty raster"));
    }
    if raster.data.len() != raster.size().rgba_len() {
        return Err(AppError::encode(
            "raster data does not match width*height*4",
        ));
    }

    let mut out = Vec::new();
    match format {
        ExportFormat::Png => PngEncoder::new(&mut out)
            .write_image(
                &raster.data,
                raster.width,
                raster.height,
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| AppError::encode(format!("png: {e}")))?,
        ExportFormat::Jpeg => {
            let rgb = flatten_on_black(&raster.data);
            JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
                .write_image(&rgb, raster.width, raster.height, ExtendedColorType::Rgb8)
                .map_err(|e| AppError::encode(format!("jpeg: {e}")))?
        }
    }
    Ok(out)
}

fn flatten_on_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let a = u32::from(px[3]);
        for &c in &px[..3] {
            rgb.push(((u32::from(c) * a + 127) / 255) as u8);
        }
    }
    rgb
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
