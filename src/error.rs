//! Error taxonomy for icon rendering.

use std::{fmt, io, path::PathBuf};

/// Errors produced while rendering or writing an icon.
#[derive(Debug)]
pub enum RenderError {
    /// The output path could not be written (missing directory, permissions, ...).
    Io { path: PathBuf, source: io::Error },

    /// A size or buffer that cannot produce a meaningful icon.
    InvalidArgument(String),

    /// The PNG encoder rejected the image.
    Encode(image::ImageError),
}

impl RenderError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Encode(err) => write!(f, "failed to encode PNG: {err}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidArgument(_) => None,
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        Self::Encode(err)
    }
}
