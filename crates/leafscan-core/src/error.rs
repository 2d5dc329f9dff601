//! Error types for LeafScan

use thiserror::Error;

/// The one failure kind an upload can end in.
///
/// The widget logs these and moves on. Nothing here is fatal or retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadFailed {
    /// Connection refused, DNS failure, reset mid-body, ...
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not a `{class, accuracy}` object, or accuracy was out of range
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for UploadFailed {
    fn from(err: reqwest::Error) -> Self {
        UploadFailed::Network(err.to_string())
    }
}

/// Main error type for LeafScan operations
#[derive(Error, Debug)]
pub enum LeafscanError {
    /// Upload to the classification endpoint failed
    #[error("Upload failed: {0}")]
    Upload(#[from] UploadFailed),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// API base URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// File did not pass the drop filter
    #[error("File rejected: {0}")]
    Rejected(String),
}

/// Result type alias using LeafscanError
pub type LeafscanResult<T> = Result<T, LeafscanError>;
