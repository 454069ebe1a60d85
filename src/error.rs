//! Error types for loading, saving and bootstrapping record files.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while moving a collection between memory and disk.
///
/// An id that matches no record is not an error; see
/// [`Outcome::NotFound`](crate::document::ops::Outcome::NotFound).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file does not exist.
    #[error("the file '{}' does not exist", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but is not a well-formed document of the expected format.
    #[error("the file '{}' is not well-formed: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The process is not allowed to read or write the file.
    #[error("no permission to access '{}'", path.display())]
    Permission { path: PathBuf },

    /// The collection could not be represented in the target format.
    #[error("the data cannot be serialized: {message}")]
    Serialization { message: String },

    /// Any other I/O failure.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Classifies an I/O error raised while touching `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => StoreError::FileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => StoreError::Permission {
                path: path.to_path_buf(),
            },
            _ => StoreError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn parse(path: &Path, message: impl Into<String>) -> Self {
        StoreError::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        StoreError::Serialization {
            message: message.into(),
        }
    }
}
