use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Main application error type that encompasses all possible failure modes
#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status error: {status} for {url} - {message}")]
    HttpStatus {
        url: String,
        status: u16,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Object storage error: s3://{bucket}/{key} - {details}")]
    ObjectStore {
        bucket: String,
        key: String,
        details: String,
    },

    #[error("{which}")]
    MissingLocation { which: &'static str },

    #[error("{location} - Could not read sitemap file")]
    CouldNotRead { location: String },

    #[error("{location} - Could not extract paths from sitemap file")]
    CouldNotExtract { location: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid output file name: {path}. Must be a valid JSON file (e.g., \"output.json\")")]
    InvalidOutputFile { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SitemapError {
    /// True for failures caused by the sitemap data or its source rather than by the caller
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            SitemapError::CouldNotRead { .. } | SitemapError::CouldNotExtract { .. }
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SitemapError>;
