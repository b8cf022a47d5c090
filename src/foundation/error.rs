/// Convenience result type used across the gallery engine.
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Top-level error taxonomy used by engine APIs.
///
/// The per-frame path never returns these; they surface from construction, configuration
/// loading, host triggers and media handles.
#[derive(thiserror::Error, Debug)]
pub enum GalleryError {
    /// Invalid user-provided geometry, durations or indices.
    #[error("validation error: {0}")]
    Validation(String),

    /// A media handle refused an operation (play rejected, decode failure, release failure).
    #[error("media error: {0}")]
    Media(String),

    /// Errors while reading or parsing a gallery configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GalleryError {
    /// Build a [`GalleryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GalleryError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`GalleryError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
