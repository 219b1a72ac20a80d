use std::{io::Cursor, sync::Arc};

use base64::Engine as _;
use image::RgbaImage;

use crate::foundation::{
    core::PixelSize,
    error::{AppError, AppResult},
};

/// Raster formats accepted for uploads and stored sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// JPEG.
    Jpeg,
    /// PNG.
    Png,
    /// WEBP.
    WebP,
}

impl ImageKind {
    /// Validate a declared MIME type.
    ///
    /// Anything other than JPEG, PNG or WEBP is rejected with the user-facing message.
    pub fn from_mime(mime: &str) -> AppResult<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/png" => Ok(Self::Png),
            "image/webp" => Ok(Self::WebP),
            _ => Err(AppError::unsupported_type()),
        }
    }

    /// Infer the kind from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> AppResult<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            _ => Err(AppError::unsupported_type()),
        }
    }

    /// Canonical MIME type.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }

    fn from_format(format: image::ImageFormat) -> AppResult<Self> {
        match format {
            image::ImageFormat::Jpeg => Ok(Self::Jpeg),
            image::ImageFormat::Png => Ok(Self::Png),
            image::ImageFormat::WebP => Ok(Self::WebP),
            _ => Err(AppError::unsupported_type()),
        }
    }

    fn format(self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::WebP => image::ImageFormat::WebP,
        }
    }
}

/// A decoded image together with the encoded bytes it came from.
///
/// Clones share both buffers.
#[derive(Clone, Debug)]
pub struct ImageAsset {
    kind: ImageKind,
    bytes: Arc<[u8]>,
    pixels: Arc<RgbaImage>,
}

impl ImageAsset {
    /// Format of the encoded bytes.
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// Encoded bytes as uploaded.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Straight-alpha RGBA8 pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Native pixel dimensions.
    pub fn size(&self) -> PixelSize {
        let (width, height) = self.pixels.dimensions();
        PixelSize::new(width, height)
    }

    /// Return `true` when both handles share the same encoded bytes.
    pub fn same_source(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

/// Validate the declared MIME type of an upload, then decode it.
pub fn decode_upload(bytes: &[u8], mime: &str) -> AppResult<ImageAsset> {
    let declared = ImageKind::from_mime(mime)?;
    let asset = decode_image(bytes)?;
    if asset.kind != declared {
        tracing::debug!(
            declared = declared.mime(),
            sniffed = asset.kind.mime(),
            "upload MIME type disagrees with content; using content"
        );
    }
    Ok(asset)
}

/// Sniff and decode JPEG, PNG or WEBP bytes into RGBA8.
pub fn decode_image(bytes: &[u8]) -> AppResult<ImageAsset> {
    if bytes.is_empty() {
        return Err(AppError::decode("image data is empty"));
    }
    let format = image::guess_format(bytes)
        .map_err(|e| AppError::decode(format!("unrecognized image data: {e}")))?;
    let kind = ImageKind::from_format(format)?;

    let dyn_img = image::load_from_memory_with_format(bytes, kind.format())
        .map_err(|e| AppError::decode(format!("decode {}: {e}", kind.mime())))?;
    let rgba = dyn_img.to_rgba8();
    PixelSize::new(rgba.width(), rgba.height()).require_non_empty("decoded image")?;

    Ok(ImageAsset {
        kind,
        bytes: Arc::from(bytes),
        pixels: Arc::new(rgba),
    })
}

/// Wrap already-decoded pixels, encoding them as PNG so the asset can be persisted.
pub fn asset_from_rgba(pixels: RgbaImage) -> AppResult<ImageAsset> {
    PixelSize::new(pixels.width(), pixels.height()).require_non_empty("image")?;
    let mut buf = Vec::new();
    pixels
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| AppError::encode(format!("encode png: {e}")))?;
    Ok(ImageAsset {
        kind: ImageKind::Png,
        bytes: Arc::from(buf),
        pixels: Arc::new(pixels),
    })
}

/// Encode an asset as a `data:<mime>;base64,...` URI.
pub fn to_data_uri(asset: &ImageAsset) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(asset.bytes());
    format!("data:{};base64,{b64}", asset.kind.mime())
}

/// Parse and decode a base64 image data URI.
pub fn from_data_uri(uri: &str) -> AppResult<ImageAsset> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| AppError::decode("data URI must start with 'data:'"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::decode("data URI has no payload"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| AppError::decode("only base64 data URIs are supported"))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::decode(format!("data URI payload: {e}")))?;
    decode_upload(&bytes, mime)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
