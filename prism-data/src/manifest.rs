//! `transforms.json` manifest loading.

use crate::error::{DataParserError, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the manifest inside a dataset directory.
pub const MANIFEST_FILE_NAME: &str = "transforms.json";

// Top-level keys that must be present before typed deserialization.
const REQUIRED_FIELDS: [&str; 7] = ["fl_x", "fl_y", "cx", "cy", "h", "w", "frames"];
const REQUIRED_FRAME_FIELDS: [&str; 2] = ["file_path", "transform_matrix"];

/// One frame entry of the manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameRecord {
    /// Image path, usually relative to the dataset directory.
    pub file_path: PathBuf,
    /// Row-major camera-to-world matrix, nominally 4x4.
    pub transform_matrix: Vec<Vec<f64>>,
}

/// Parsed `transforms.json`.
///
/// Intrinsics are shared by every frame; per-frame intrinsics are not part of
/// this format.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Manifest {
    pub fl_x: f64,
    pub fl_y: f64,
    pub cx: f64,
    pub cy: f64,
    pub h: f64,
    pub w: f64,
    pub frames: Vec<FrameRecord>,
}

impl Manifest {
    /// Load `transforms.json` from a dataset directory.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(MANIFEST_FILE_NAME);
        let value = load_from_json(&path)?;
        Self::from_value(&path, value)
    }

    /// Build a typed manifest from already parsed JSON.
    ///
    /// `path` is only used for error reporting.
    pub fn from_value(path: &Path, value: JsonValue) -> Result<Self> {
        check_required_fields(path, &value)?;

        let manifest: Manifest =
            serde_json::from_value(value).map_err(|source| DataParserError::InvalidManifest {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "Manifest has {} frames ({}x{}, fl_x={}, fl_y={})",
            manifest.frames.len(),
            manifest.w,
            manifest.h,
            manifest.fl_x,
            manifest.fl_y
        );
        Ok(manifest)
    }
}

/// Read a file and parse it as JSON.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_from_json(path: &Path) -> Result<JsonValue> {
    debug!("Loading JSON from: {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            DataParserError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DataParserError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&contents).map_err(|source| {
        warn!("Failed to parse JSON: {}", source);
        DataParserError::InvalidJson {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn check_required_fields(path: &Path, value: &JsonValue) -> Result<()> {
    let missing = |field: String| DataParserError::MissingField {
        path: path.to_path_buf(),
        field,
    };

    for field in REQUIRED_FIELDS {
        if value.get(field).is_none() {
            return Err(missing(field.to_string()));
        }
    }

    if let Some(JsonValue::Array(frames)) = value.get("frames") {
        for (i, frame) in frames.iter().enumerate() {
            for field in REQUIRED_FRAME_FIELDS {
                if frame.get(field).is_none() {
                    return Err(missing(format!("frames[{}].{}", i, field)));
                }
            }
        }
    }

    Ok(())
}
