//! Error types for dataset loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning a dataset manifest into dataparser outputs.
///
/// Every variant aborts the whole load; no partial outputs are ever returned.
#[derive(Debug, Error)]
pub enum DataParserError {
    #[error("Manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing required field '{field}' in {}", path.display())]
    MissingField { path: PathBuf, field: String },

    #[error("Invalid manifest {}: {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed transform_matrix at frame {frame}: expected 4x4, got {rows} rows (shortest row has {cols} entries)")]
    MalformedPose {
        frame: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid image size: '{field}' must be a positive integer, got {value}")]
    InvalidImageSize { field: &'static str, value: f64 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DataParserError>;
