use crate::assets::decode::{ImageAsset, from_data_uri, to_data_uri};
use crate::foundation::{core::Point, error::AppResult};
use crate::persist::repository::Repository;
use crate::session::model::{EffectParams, normalize_logo_scale};

/// Source image as a data URI.
pub const KEY_IMAGE: &str = "aisaidso.image";
/// Logo as a data URI; absent when no logo is selected.
pub const KEY_LOGO: &str = "aisaidso.logo";
/// JSON-encoded [`EffectParams`].
pub const KEY_EFFECTS: &str = "aisaidso.effects";
/// JSON-encoded logo position `{ "x": .., "y": .. }`.
pub const KEY_LOGO_POSITION: &str = "aisaidso.logoPosition";
/// Logo scale as a decimal string.
pub const KEY_LOGO_SCALE: &str = "aisaidso.logoScale";

const ALL_KEYS: [&str; 5] = [
    KEY_IMAGE,
    KEY_LOGO,
    KEY_EFFECTS,
    KEY_LOGO_POSITION,
    KEY_LOGO_SCALE,
];

/// Whatever could be recovered from storage. Missing or corrupt entries hold defaults.
#[derive(Clone, Debug)]
pub struct RestoredSession {
    /// Stored source image.
    pub image: Option<ImageAsset>,
    /// Stored logo.
    pub logo: Option<ImageAsset>,
    /// Stored effects, or defaults.
    pub effects: EffectParams,
    /// Stored logo position, if any.
    pub logo_position: Option<Point>,
    /// Stored logo scale, or `1.0`.
    pub logo_scale: f64,
}

/// Mirrors session state into a [`Repository`] and reads it back on startup.
#[derive(Debug)]
pub struct SessionStore<R> {
    repo: R,
}

impl<R: Repository> SessionStore<R> {
    /// Wrap a repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrow the repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Consume the store and return the repository.
    pub fn into_repo(self) -> R {
        self.repo
    }

    /// Read every stored field. Never fails: read errors and unparseable values are logged and
    /// replaced by defaults.
    pub fn restore(&self) -> RestoredSession {
        let image = self
            .read(KEY_IMAGE)
            .and_then(|uri| warn_on_err(KEY_IMAGE, from_data_uri(&uri)));
        let logo = self
            .read(KEY_LOGO)
            .and_then(|uri| warn_on_err(KEY_LOGO, from_data_uri(&uri)));
        let effects = self
            .read(KEY_EFFECTS)
            .and_then(|json| {
                warn_on_err(
                    KEY_EFFECTS,
                    serde_json::from_str::<EffectParams>(&json).map_err(Into::into),
                )
            })
            .unwrap_or_default();
        let logo_position = self.read(KEY_LOGO_POSITION).and_then(|json| {
            warn_on_err(
                KEY_LOGO_POSITION,
                serde_json::from_str::<Point>(&json).map_err(Into::into),
            )
            .filter(|p| p.is_finite())
        });
        let logo_scale = self
            .read(KEY_LOGO_SCALE)
            .and_then(|s| match s.trim().parse::<f64>() {
                Ok(v) => Some(normalize_logo_scale(v)),
                Err(e) => {
                    tracing::warn!(key = KEY_LOGO_SCALE, error = %e, "ignoring stored value");
                    None
                }
            })
            .unwrap_or(1.0);

        RestoredSession {
            image,
            logo,
            effects,
            logo_position,
            logo_scale,
        }
    }

    /// Store the source image, or remove it.
    pub fn save_image(&mut self, image: Option<&ImageAsset>) -> AppResult<()> {
        self.write_asset(KEY_IMAGE, image)
    }

    /// Store the logo, or remove it.
    pub fn save_logo(&mut self, logo: Option<&ImageAsset>) -> AppResult<()> {
        self.write_asset(KEY_LOGO, logo)
    }

    /// Store effect parameters as JSON.
    pub fn save_effects(&mut self, effects: &EffectParams) -> AppResult<()> {
        let json = serde_json::to_string(effects)?;
        self.repo.set(KEY_EFFECTS, &json)
    }

    /// Store the committed logo position as JSON.
    pub fn save_logo_position(&mut self, position: Point) -> AppResult<()> {
        let json = serde_json::to_string(&position)?;
        self.repo.set(KEY_LOGO_POSITION, &json)
    }

    /// Store the logo scale.
    pub fn save_logo_scale(&mut self, scale: f64) -> AppResult<()> {
        self.repo.set(KEY_LOGO_SCALE, &scale.to_string())
    }

    /// Remove every session key.
    pub fn clear(&mut self) -> AppResult<()> {
        for key in ALL_KEYS {
            self.repo.remove(key)?;
        }
        Ok(())
    }

    fn write_asset(&mut self, key: &str, asset: Option<&ImageAsset>) -> AppResult<()> {
        match asset {
            Some(a) => self.repo.set(key, &to_data_uri(a)),
            None => self.repo.remove(key),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.repo.get(key) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "session store read failed");
                None
            }
        }
    }
}

fn warn_on_err<T>(key: &str, r: AppResult<T>) -> Option<T> {
    match r {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring stored value");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/store.rs"]
mod tests;
