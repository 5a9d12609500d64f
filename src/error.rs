// Error types for asin-cache.
// Covers provider transport failures, decode failures, and cache filesystem errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Missing RAINFOREST_API_KEY environment variable")]
    MissingApiKey,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cached entry for {id} at {} is corrupt: {source}", path.display())]
    CorruptEntry {
        id: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid product id {0:?}: only ASCII letters, digits and '-' are allowed")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine a cache directory")]
    NoCacheDir,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;
