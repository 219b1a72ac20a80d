use std::path::Path;

use crate::assets::decode::{ImageAsset, ImageKind, decode_upload};
use crate::foundation::error::{AppError, AppResult};

/// A selectable watermark logo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogoPreset {
    /// Stable identifier used on the command line and in UIs.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Image path relative to the assets root; `None` means "no logo".
    pub path: Option<&'static str>,
}

const PRESETS: &[LogoPreset] = &[
    LogoPreset {
        id: "midjourney",
        name: "Midjourney",
        path: Some("images/logos/midjourney.png"),
    },
    LogoPreset {
        id: "dalle",
        name: "DALL-E",
        path: Some("images/logos/dalle.png"),
    },
    LogoPreset {
        id: "stable-diffusion",
        name: "Stable Diffusion",
        path: Some("images/logos/stable-diffusion.png"),
    },
    LogoPreset {
        id: "leonardo",
        name: "Leonardo AI",
        path: Some("images/logos/leonardo.png"),
    },
    LogoPreset {
        id: "none",
        name: "No logo",
        path: None,
    },
];

/// Built-in logo presets.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogoCatalog;

impl LogoCatalog {
    /// All presets in display order.
    pub fn presets() -> &'static [LogoPreset] {
        PRESETS
    }

    /// Look up a preset by id.
    pub fn find(id: &str) -> Option<&'static LogoPreset> {
        PRESETS.iter().find(|p| p.id == id)
    }

    /// Load a preset's image from `root`.
    ///
    /// Returns `Ok(None)` for the "none" preset.
    pub fn load(root: &Path, id: &str) -> AppResult<Option<ImageAsset>> {
        let preset =
            Self::find(id).ok_or_else(|| AppError::validation(format!("unknown logo '{id}'")))?;
        let Some(rel) = preset.path else {
            return Ok(None);
        };

        let path = root.join(rel);
        let bytes = std::fs::read(&path)
            .map_err(|e| AppError::decode(format!("read logo '{}': {e}", path.display())))?;
        let kind = path
            .extension()
            .and_then(|e| e.to_str())
            .map(ImageKind::from_extension)
            .transpose()?
            .unwrap_or(ImageKind::Png);
        decode_upload(&bytes, kind.mime()).map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
