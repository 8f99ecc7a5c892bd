//! Errors surfaced by the editor core.
//!
//! Edits never fail (coordinates are clamped), so only persistence and
//! transforms produce errors. The binary turns each one into a status
//! message; none of them leaves the document half-changed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("no file name")]
    NoFileName,

    #[error("{transform} is not available for {filetype}")]
    TransformUnavailable {
        transform: &'static str,
        filetype: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
