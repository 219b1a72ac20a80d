/// Crate-wide result alias.
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced by the editing pipeline.
///
/// None of these are fatal to a running editor: the editor logs decode, render and storage
/// failures and keeps the previous state. Only [`AppError::UnsupportedType`] carries a message
/// meant to be shown to the user verbatim.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// An upload with a type other than JPEG, PNG or WEBP.
    #[error("{0}")]
    UnsupportedType(String),

    /// Invalid input or an impossible request (empty raster, missing source image).
    #[error("validation error: {0}")]
    Validation(String),

    /// Image bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A raster could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// The key-value repository failed to read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored value could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// User-facing rejection text for unsupported uploads.
pub const UNSUPPORTED_UPLOAD_MESSAGE: &str = "Please upload a JPG, PNG or WEBP image";

impl AppError {
    /// Build an [`AppError::UnsupportedType`] with the standard user-facing message.
    pub fn unsupported_type() -> Self {
        Self::UnsupportedType(UNSUPPORTED_UPLOAD_MESSAGE.to_string())
    }

    /// Build an [`AppError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AppError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build an [`AppError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build an [`AppError::Storage`].
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build an [`AppError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors that should be shown to the user rather than only logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::UnsupportedType(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
