//! Error types for the prism application.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or running a dataset load.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Dataset error: {0}")]
    DataParser(#[from] prism_data::DataParserError),
}
