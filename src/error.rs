//! Error types.

use std::path::PathBuf;

use crate::font::FontError;
use crate::layout::LayoutOverflow;

/// Why a file could not be persisted.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("manifest serialization failed: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Errors produced while generating an icon catalog.
///
/// Font and overflow problems are recovered inside layout and surface in
/// [`RequestOutcome::recovered`](crate::RequestOutcome::recovered). Write
/// and canvas errors fail the single request they occur in.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    FontResolution(#[from] FontError),

    #[error("lockup needs {required}px but the canvas is {size}px")]
    LayoutOverflow { size: u32, required: u32 },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: WriteError,
    },

    #[error("cannot allocate a {0}x{0} canvas")]
    CanvasSize(u32),

    #[error("invalid size set: {0}")]
    InvalidSizeSet(String),

    #[error("invalid icon spec: {0}")]
    Spec(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
}

impl Error {
    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<WriteError>) -> Self {
        Self::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<LayoutOverflow> for Error {
    fn from(overflow: LayoutOverflow) -> Self {
        Self::LayoutOverflow {
            size: overflow.size,
            required: overflow.required,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_names_the_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::write("out/icon-40.png", io);
        let message = err.to_string();
        assert!(message.contains("out/icon-40.png"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn font_errors_convert() {
        let err: Error = FontError::MissingGlyph {
            family: "Arial".to_string(),
            ch: 'ş',
        }
        .into();
        assert!(matches!(err, Error::FontResolution(_)));
    }

    #[test]
    fn overflow_converts() {
        let err: Error = LayoutOverflow {
            size: 58,
            required: 71,
        }
        .into();
        assert_eq!(err.to_string(), "lockup needs 71px but the canvas is 58px");
    }
}
