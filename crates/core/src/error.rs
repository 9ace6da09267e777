use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while turning [`crate::RobotsSettings`] into a servable payload.
///
/// These only ever happen during setup. Once the route has been installed
/// serving it cannot fail.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The configured file could not be opened or read.
    #[error("cannot load the file {}: {source}", .path.display())]
    Load {
        /// Absolute path of the file that was read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },

    /// The configured file was read but decoded to an empty string.
    #[error(
        "cannot load the file {}: file content must be a non-empty string",
        .path.display()
    )]
    EmptyFile {
        /// Absolute path of the file that was read.
        path: PathBuf,
    },

    /// The requested text encoding is not one that is supported.
    #[error("unsupported text encoding '{0}'")]
    UnsupportedEncoding(String),
}
