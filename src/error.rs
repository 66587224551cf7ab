//! Error types shared by the library

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or building the post index
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Content source not found: `{}`", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Invalid metadata in `{}`: {reason}", .path.display())]
    Metadata { path: PathBuf, reason: String },

    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
}

impl Error {
    pub(crate) fn metadata(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Metadata {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_error_display() {
        let io_err = Error::Io(
            PathBuf::from("posts/hello.md"),
            IoError::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("posts/hello.md"));

        let meta_err = Error::metadata("posts/broken.md", "missing field `date`");
        let display = format!("{meta_err}");
        assert!(display.contains("posts/broken.md"));
        assert!(display.contains("missing field `date`"));

        let missing = Error::SourceNotFound(PathBuf::from("site/posts"));
        assert!(format!("{missing}").contains("site/posts"));
    }
}
