//! Error types for SHL

use std::path::PathBuf;
use thiserror::Error;

/// SHL error type
#[derive(Error, Debug)]
pub enum Error {
    /// The root header is missing, or an include could not be resolved
    #[error("Header not found: {target}{}", included_from(.from))]
    HeaderNotFound {
        target: String,
        from: Option<PathBuf>,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

fn included_from(from: &Option<PathBuf>) -> String {
    from.as_ref()
        .map(|f| format!(" (included from {})", f.display()))
        .unwrap_or_default()
}

impl Error {
    /// Header lookup failure for `target`, optionally naming the including file
    pub fn not_found(target: impl Into<String>, from: Option<PathBuf>) -> Self {
        Error::HeaderNotFound {
            target: target.into(),
            from,
        }
    }
}

/// Result type alias for SHL
pub type Result<T> = std::result::Result<T, Error>;
