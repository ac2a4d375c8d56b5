use std::path::PathBuf;

use thiserror::Error;

/// Faults raised by the resolution engine.
///
/// A missing theme or a missing icon is not an error: those come back as
/// `Ok(None)` from every resolution entry point.
#[derive(Debug, Error)]
pub enum IconError {
    /// Icon themes are a freedesktop convention; nothing is probed elsewhere.
    #[error("icon theme resolution is not supported on {0}")]
    UnsupportedPlatform(String),

    #[error("malformed theme index {}: {message}", path.display())]
    MalformedIndex { path: PathBuf, message: String },

    #[error("icon file {} is missing", .0.display())]
    SourceFileMissing(PathBuf),

    #[error("failed to query the active icon theme: {0}")]
    ExternalQueryFailed(String),

    #[error("failed to rasterize {}: {message}", path.display())]
    Rasterize { path: PathBuf, message: String },

    #[error("streaming resolution needs a Tokio runtime: {0}")]
    NoRuntime(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type IconResult<T> = Result<T, IconError>;
