//! Error types for pireader operations.

use thiserror::Error;

/// Errors that can occur while loading or rendering label content.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Failed to fetch {location}: {status}")]
    Status { location: String, status: u16 },

    #[error("Invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported format '{0}'. Provide precompiled HTML.")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
